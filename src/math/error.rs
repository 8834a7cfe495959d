// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
}

pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::InsufficientPoints {
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("expected at least 3"));

        let err = MathError::NonFiniteVertex { index: 4 };
        assert_eq!(err.to_string(), "Vertex 4 is not finite");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MathError>();
    }
}
