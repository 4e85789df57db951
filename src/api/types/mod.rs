//! API request/response types

pub mod error;
pub mod team;

pub use error::{ApiError, ApiErrorBody};
pub use team::TeamDto;
