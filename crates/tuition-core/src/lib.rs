pub mod amortization;
pub mod capitalization;
pub mod error;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod types;

pub use error::TuitionError;
pub use types::*;

/// Standard result type for all tuition-planner operations
pub type TuitionResult<T> = Result<T, TuitionError>;
