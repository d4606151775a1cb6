pub mod error;
pub mod types;

#[cfg(feature = "learn_score")]
pub mod learn_score;

#[cfg(feature = "lending")]
pub mod lending;

pub use error::EduLendError;
pub use types::*;

/// Standard result type for fallible edulend operations
pub type EduLendResult<T> = Result<T, EduLendError>;
