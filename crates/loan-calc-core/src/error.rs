use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Domain error: {context} produced a non-finite value ({value})")]
    DomainError { context: String, value: f64 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    /// True for every rejection that the CLI reports as "Incorrect parameters".
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LoanCalcError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
