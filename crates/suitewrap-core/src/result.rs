//! Convenience result type alias for suitewrap.

use crate::error::AppError;

/// A specialized `Result` type for suitewrap operations.
pub type AppResult<T> = Result<T, AppError>;
