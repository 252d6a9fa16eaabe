use thiserror::Error;

/// Errors raised by the stack resolver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The prompt was not a string
    #[error("prompt must be a string, got {found}")]
    InvalidInputType { found: &'static str },

    /// The prompt was empty or whitespace-only
    #[error("prompt must not be empty")]
    EmptyInput,

    /// A rule definition could not be compiled into a trigger
    #[error("invalid rule trigger '{trigger}': {reason}")]
    InvalidRule { trigger: String, reason: String },
}

impl ResolveError {
    /// True for errors caused by caller-supplied input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ResolveError::InvalidInputType { .. } | ResolveError::EmptyInput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ResolveError::EmptyInput.to_string(), "prompt must not be empty");
        assert_eq!(
            ResolveError::InvalidInputType { found: "number" }.to_string(),
            "prompt must be a string, got number"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ResolveError::EmptyInput.is_input_error());
        assert!(ResolveError::InvalidInputType { found: "null" }.is_input_error());
        assert!(!ResolveError::InvalidRule {
            trigger: "c++".to_string(),
            reason: "bad".to_string()
        }
        .is_input_error());
    }
}
