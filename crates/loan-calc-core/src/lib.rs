pub mod annuity;
pub mod calculator;
pub mod differentiated;
pub mod duration;
pub mod error;
pub mod report;
pub mod types;
pub mod validation;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
