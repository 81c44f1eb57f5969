/// Core error types for textcard.
use std::path::PathBuf;

/// A specialized Result type for textcard operations.
pub type TextcardResult<T> = Result<T, TextcardError>;

/// Top-level error type encompassing all textcard subsystems.
#[derive(Debug, thiserror::Error)]
pub enum TextcardError {
    #[error("invalid canvas dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("asset error: {message} ({path:?})")]
    Asset { message: String, path: PathBuf },

    #[error("config error: {0}")]
    Config(String),

    #[error("summarize error: {0}")]
    Summarize(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TextcardError {
    /// Create an asset error.
    pub fn asset(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        TextcardError::Asset {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl From<crate::color::ColorError> for TextcardError {
    fn from(err: crate::color::ColorError) -> Self {
        TextcardError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_display() {
        let err = TextcardError::InvalidDimensions {
            width: 0,
            height: 600,
        };
        assert_eq!(
            err.to_string(),
            "invalid canvas dimensions 0x600: both must be greater than zero"
        );
    }

    #[test]
    fn test_asset_error_display() {
        let err = TextcardError::asset("file not found", "/assets/overlay.png");
        assert!(err.to_string().contains("file not found"));
        assert!(err.to_string().contains("overlay.png"));
    }

    #[test]
    fn test_color_error_converts() {
        let err: TextcardError = crate::Color::from_hex("#zz").unwrap_err().into();
        assert!(matches!(err, TextcardError::InvalidArgument(_)));
    }
}
