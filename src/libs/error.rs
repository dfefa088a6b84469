use std::fmt;

pub type Result<T> = std::result::Result<T, TadError>;

/// Errors raised by the feature, clustering and scoring stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TadError {
    /// A parameter is outside its valid range (window length, eps, min points)
    InvalidParameter {
        /// Parameter name as used on the command line
        name: &'static str,
        /// A human-readable message explaining the constraint
        message: String,
    },
    /// A sequence is too short to compute a norm or an elbow
    InsufficientData {
        /// What was being computed
        what: &'static str,
        /// Minimum number of values needed
        needed: usize,
        /// Number of values available
        found: usize,
    },
    /// A score would divide by zero
    DegenerateInput(String),
}

impl fmt::Display for TadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TadError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
            TadError::InsufficientData {
                what,
                needed,
                found,
            } => write!(
                f,
                "Insufficient data for {}: need at least {} values, found {}",
                what, needed, found
            ),
            TadError::DegenerateInput(msg) => write!(f, "Degenerate input: {}", msg),
        }
    }
}

impl std::error::Error for TadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TadError::InvalidParameter {
            name: "eps",
            message: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'eps': must be positive");

        let err = TadError::InsufficientData {
            what: "k-distances",
            needed: 4,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data for k-distances: need at least 4 values, found 3"
        );
    }

    #[test]
    fn test_into_anyhow() {
        let res: anyhow::Result<()> = Err(TadError::DegenerateInput("n1 * n2 = 1".into()).into());
        let msg = format!("{}", res.unwrap_err());
        assert!(msg.contains("n1 * n2 = 1"));
    }
}
