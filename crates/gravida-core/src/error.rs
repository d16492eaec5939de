use thiserror::Error;

/// Coarse error category, so callers can branch without matching
/// every variant: bad caller data vs bad reference configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Configuration,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} {value} is outside the supported range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("date arithmetic failed: {0}")]
    DateArithmetic(String),

    #[error("reference table needs at least two control points, got {0}")]
    TableTooSparse(usize),

    #[error("reference table x values must be strictly increasing at index {0}")]
    TableOrder(usize),

    #[error("reference table holds a non-finite control point at index {0}")]
    TablePoint(usize),

    #[error("curve set is misconfigured: {0}")]
    CurveSet(String),

    #[error("threshold bands must be strictly increasing at index {0}")]
    BandOrder(usize),

    #[error("adjustment '{name}' produced an unusable multiplier {multiplier}")]
    BadMultiplier { name: String, multiplier: f64 },

    #[error("baseline table produced odds {0} outside (0, 1]")]
    BaselineOdds(f64),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NonFinite { .. }
            | CoreError::OutOfRange { .. }
            | CoreError::MissingInput(_)
            | CoreError::DateArithmetic(_) => ErrorKind::InvalidInput,
            CoreError::TableTooSparse(_)
            | CoreError::TableOrder(_)
            | CoreError::TablePoint(_)
            | CoreError::CurveSet(_)
            | CoreError::BandOrder(_)
            | CoreError::BadMultiplier { .. }
            | CoreError::BaselineOdds(_) => ErrorKind::Configuration,
        }
    }
}
