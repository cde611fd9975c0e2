//! Error types for verbal expressions
//!
//! Builder verbs never fail. Errors only surface once a pattern is handed to
//! the regex evaluator, either when it is compiled or while it is matched.

use thiserror::Error;

/// The main error type for evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerexError {
    /// The evaluator rejected the assembled pattern
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The pattern that failed to compile
        pattern: String,
        /// The evaluator's description of the problem
        message: String,
    },

    /// The evaluator failed while matching or replacing
    #[error("evaluation error: {0}")]
    Evaluation(String),
}

impl VerexError {
    /// Create an invalid pattern error from any evaluator error
    pub fn invalid_pattern(pattern: &str, err: impl std::fmt::Display) -> Self {
        VerexError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    /// Whether the error came from the compile step
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, VerexError::InvalidPattern { .. })
    }
}

/// Result type alias for expression evaluation
pub type Result<T> = std::result::Result<T, VerexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = VerexError::InvalidPattern {
            pattern: "[a-".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pattern `[a-`: unclosed character class"
        );
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_invalid_pattern_from_display() {
        let err = VerexError::invalid_pattern("(?:", "unclosed group");
        assert_eq!(
            err,
            VerexError::InvalidPattern {
                pattern: "(?:".to_string(),
                message: "unclosed group".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluation_display() {
        let err = VerexError::Evaluation("backtrack limit exceeded".to_string());
        assert_eq!(err.to_string(), "evaluation error: backtrack limit exceeded");
        assert!(!err.is_invalid_pattern());
    }
}
