/// Shared application layer patterns
///
/// This module contains application-level abstractions used across
/// multiple bounded contexts.
pub mod pagination;
pub mod response;

pub use pagination::*;
pub use response::{respond, respond_paged, ApiResponse, ErrorBody, FailureEnvelope, SuccessEnvelope};
