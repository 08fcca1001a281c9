//! Error types shared by the loaders and the validated computations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// `row` is the zero-based data row index (header excluded)
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("Unknown effect estimate '{method}' (known: {known})")]
    UnknownEffect { method: String, known: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter { name, reason: reason.into() }
    }

    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedRecord { row, reason: reason.into() }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AnalysisError::invalid("years", "must be positive");
        assert_eq!(err.to_string(), "Invalid parameter 'years': must be positive");

        let err = AnalysisError::malformed(3, "missing retained");
        assert_eq!(err.to_string(), "Malformed record at row 3: missing retained");
    }
}
