pub mod error;
pub mod types;

#[cfg(feature = "tvm")]
pub mod tvm;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "savings")]
pub mod savings;

pub use error::FinMathError;
pub use types::*;

/// Standard result type for all finmath operations
pub type FinMathResult<T> = Result<T, FinMathError>;
