//! Error types for the harmonizer.

use thiserror::Error;

/// Result type for harmonizer operations.
pub type Result<T> = std::result::Result<T, HarmonizerError>;

/// Errors that can occur while analysing or synthesizing audio.
#[derive(Debug, Error)]
pub enum HarmonizerError {
    /// A parameter or input buffer was rejected at the boundary.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The frame tiling does not fill the output buffer exactly.
    #[error("buffer size mismatch: expected {expected} samples, frames cover {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Recording from the input device failed.
    #[error("capture error: {message}")]
    Capture { message: String },

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl HarmonizerError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a capture error.
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_param_names_the_parameter() {
        let err = HarmonizerError::invalid_param("frame_duration", "must be positive");
        assert!(err.to_string().contains("frame_duration"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn mismatch_reports_both_sizes() {
        let err = HarmonizerError::BufferSizeMismatch {
            expected: 44100,
            actual: 33075,
        };
        assert!(err.to_string().contains("44100"));
        assert!(err.to_string().contains("33075"));
    }

    #[test]
    fn capture_error_keeps_the_device_message() {
        let err = HarmonizerError::capture("no input device available");
        assert!(matches!(err, HarmonizerError::Capture { .. }));
        assert_eq!(err.to_string(), "capture error: no input device available");
    }
}
