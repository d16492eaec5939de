use thiserror::Error;

use gravida_core::error::{CoreError, ErrorKind};

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CalculatorError {
    /// Collapses to the core two-way taxonomy. Registry misses and serde
    /// rejections are caller problems, not configuration ones.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalculatorError::UnknownCalculator(_) | CalculatorError::MalformedRequest(_) => {
                ErrorKind::InvalidInput
            }
            CalculatorError::Core(e) => e.kind(),
        }
    }
}
