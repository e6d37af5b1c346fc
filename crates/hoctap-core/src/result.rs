//! Result type aliases for HocTap.

use crate::HoctapError;

/// A specialized `Result` type for HocTap operations.
pub type HoctapResult<T> = Result<T, HoctapError>;
