//! # Error Types
//!
//! Result codes for every drawing operation. The taxonomy is flat on purpose:
//! firmware callers branch on the kind of failure, not on its details.

use bootgfx_hal::HalError;
use core::fmt;

/// Numeric code reported for a successful call
pub const SUCCESS: u32 = 0x00;

/// Main error type for drawing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GfxError {
    /// The canvas could not be set up
    InitializationFailed(InitError),
    /// The requested shape or image does not fit on the canvas
    BoundaryExceeded,
    /// The bitmap uses a header variant, depth or compression we do not draw
    BitmapFormatUnsupported,
    /// The bitmap is internally inconsistent or truncated
    BitmapDataInvalid,
    /// The buffer does not start with the bitmap signature
    BitmapSignatureMismatch,
    /// The scale factor works out to zero
    ScaleOutOfRange,
}

impl GfxError {
    /// Numeric result code for integer-speaking callers
    pub const fn code(&self) -> u32 {
        match self {
            Self::InitializationFailed(_) => 0x01,
            Self::BoundaryExceeded => 0x02,
            Self::BitmapSignatureMismatch => 0x10,
            Self::BitmapDataInvalid => 0x11,
            Self::BitmapFormatUnsupported => 0x12,
            Self::ScaleOutOfRange => 0x13,
        }
    }
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(e) => write!(f, "Initialization failed: {}", e),
            Self::BoundaryExceeded => write!(f, "Canvas boundary exceeded"),
            Self::BitmapFormatUnsupported => write!(f, "Unsupported bitmap format"),
            Self::BitmapDataInvalid => write!(f, "Invalid bitmap data"),
            Self::BitmapSignatureMismatch => write!(f, "Bitmap signature mismatch"),
            Self::ScaleOutOfRange => write!(f, "Scale out of range"),
        }
    }
}

impl From<InitError> for GfxError {
    fn from(e: InitError) -> Self {
        Self::InitializationFailed(e)
    }
}

/// Reasons the canvas could not be set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Firmware did not report a framebuffer
    NoFramebuffer,
    /// The framebuffer could not be mapped
    MappingFailed(HalError),
    /// Screen is taller than wide
    PortraitScreen {
        /// Horizontal resolution reported by firmware
        x_resolution: u32,
        /// Vertical resolution reported by firmware
        y_resolution: u32,
    },
    /// Pixel depth or channel fields the writer cannot honor
    UnsupportedPixelLayout,
    /// Backing memory is shorter than the described framebuffer
    FramebufferTooSmall {
        /// Bytes the descriptor calls for
        required: usize,
        /// Bytes actually supplied
        provided: usize,
    },
    /// Normalized scale of zero
    InvalidCanvasScale,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFramebuffer => write!(f, "No framebuffer available"),
            Self::MappingFailed(e) => write!(f, "Framebuffer mapping failed: {}", e),
            Self::PortraitScreen { x_resolution, y_resolution } => {
                write!(f, "Portrait screens are not supported ({}x{})", x_resolution, y_resolution)
            }
            Self::UnsupportedPixelLayout => write!(f, "Unsupported pixel layout"),
            Self::FramebufferTooSmall { required, provided } => {
                write!(f, "Framebuffer too small: need {} bytes, got {}", required, provided)
            }
            Self::InvalidCanvasScale => write!(f, "Canvas scale must be non-zero"),
        }
    }
}

/// Result type alias for drawing operations
pub type GfxResult<T> = core::result::Result<T, GfxError>;

/// Collapse a drawing result into its numeric code
pub fn result_code(result: &GfxResult<()>) -> u32 {
    match result {
        Ok(()) => SUCCESS,
        Err(e) => e.code(),
    }
}
