pub mod player_record;

pub use player_record::{PlayerRecord, TitleSet};
