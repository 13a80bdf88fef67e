/// Shared domain concepts
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
