//! Error types for sketchify-canvas

use thiserror::Error;

/// Drawing surface error type
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Display size is zero, negative or not finite
    #[error("invalid display size: {width}x{height}")]
    InvalidDisplaySize {
        /// Requested display width
        width: f32,
        /// Requested display height
        height: f32,
    },

    /// Device pixel ratio is zero, negative or not finite
    #[error("invalid device pixel ratio: {0}")]
    InvalidPixelRatio(f32),

    /// Backing store could not be allocated
    #[error("cannot allocate {width}x{height} backing store")]
    Allocation {
        /// Backing width in physical pixels
        width: u32,
        /// Backing height in physical pixels
        height: u32,
    },

    /// Color string is not a recognised hex color
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// PNG encoding failed
    #[error("encoding error: {0}")]
    Encode(String),
}

impl SurfaceError {
    /// Get error code for logs and client messages
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDisplaySize { .. } => "invalid_display_size",
            Self::InvalidPixelRatio(_) => "invalid_pixel_ratio",
            Self::Allocation { .. } => "allocation_failed",
            Self::InvalidColor(_) => "invalid_color",
            Self::Encode(_) => "encode_failed",
        }
    }
}

/// Result type alias for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SurfaceError::InvalidPixelRatio(0.0);
        assert_eq!(err.code(), "invalid_pixel_ratio");

        let err = SurfaceError::Allocation {
            width: 1,
            height: 1,
        };
        assert_eq!(err.code(), "allocation_failed");
    }

    #[test]
    fn test_error_display() {
        let err = SurfaceError::InvalidDisplaySize {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(err.to_string(), "invalid display size: 0x600");

        let err = SurfaceError::InvalidColor("purple-ish".to_string());
        assert!(err.to_string().contains("purple-ish"));
    }
}
