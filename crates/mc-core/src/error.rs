//! Error types for Mind Circus
//!
//! Gameplay misses (early taps, wrong guesses) are outcomes, not errors.
//! This enum only covers misuse of the API and bad input documents.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error("Duplicate stage id: {0}")]
    DuplicateStage(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ArcadeError {
    /// True for errors caused by the caller's documents rather than API misuse
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidContent(_) | Self::Serialization(_)
        )
    }
}

/// Result type alias
pub type ArcadeResult<T> = Result<T, ArcadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArcadeError::UnknownStage("bonus".into());
        assert_eq!(err.to_string(), "Unknown stage: bonus");

        let err = ArcadeError::DuplicateStage("spark".into());
        assert!(err.to_string().contains("spark"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ArcadeError::InvalidConfig("x".into()).is_input_error());
        assert!(ArcadeError::Serialization("x".into()).is_input_error());
        assert!(!ArcadeError::UnknownStage("x".into()).is_input_error());
    }
}
