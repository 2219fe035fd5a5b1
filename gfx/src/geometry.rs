//! Coordinate engine
//!
//! Two coordinate spaces are in play and never mixed without an explicit
//! conversion:
//!
//! - **normalized**: `0..=canvas_scale` on both axes, independent of the
//!   screen resolution
//! - **canvas**: physical pixels, `0..=width` / `0..=height`, relative to the
//!   canvas' top-left corner
//!
//! The canvas is the square region in the middle of a landscape screen. It
//! spans the full screen height and leaves bars on the left and right.

use bootgfx_hal::firmware::FramebufferDescriptor;

use crate::error::InitError;

// =============================================================================
// VECTOR
// =============================================================================

/// 2D point or extent
///
/// Used as a size, a vector is a displacement added to a top-left point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vector {
    /// X coordinate (or width)
    pub x: u32,
    /// Y coordinate (or height)
    pub y: u32,
}

impl Vector {
    /// Create new vector
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Origin point
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Component-wise sum, saturating
    pub const fn add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }

    /// Multiply both components by `scale / base`, truncating
    pub fn scale(self, scale: u64, base: u64) -> Self {
        Self::new(scale_axis(self.x, scale, base), scale_axis(self.y, scale, base))
    }
}

/// `value * num / den` in 64-bit, saturated to `u32`
fn scale_axis(value: u32, num: u64, den: u64) -> u32 {
    if den == 0 {
        return u32::MAX;
    }
    let scaled = (value as u64)
        .checked_mul(num)
        .map_or(u64::MAX, |v| v / den);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

// =============================================================================
// CANVAS
// =============================================================================

/// Where a canvas-space point falls relative to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Strictly inside on both axes
    Inside,
    /// On the right or bottom edge (a legal far corner)
    OnBoundary,
    /// Beyond the canvas on at least one axis
    Outside,
}

impl Boundary {
    /// Check if a far corner at this position is acceptable
    pub const fn is_within(&self) -> bool {
        !matches!(self, Boundary::Outside)
    }
}

/// Square drawing region centered on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels (equal to the height)
    pub width: u32,
    /// Height in pixels (the full vertical resolution)
    pub height: u32,
    /// Horizontal position of the canvas on the screen
    pub offset: u32,
    /// Normalized extent mapped onto the canvas
    pub scale: u32,
}

impl Canvas {
    /// Derive the canvas from a framebuffer descriptor
    ///
    /// Fails for portrait screens and for a zero normalized scale.
    pub fn from_descriptor(fb: &FramebufferDescriptor, scale: u32) -> Result<Self, InitError> {
        if scale == 0 {
            return Err(InitError::InvalidCanvasScale);
        }

        let height = fb.y_resolution;
        let width = height;
        let offset = match fb.x_resolution.checked_sub(width) {
            Some(bars) => bars / 2,
            None => {
                log::warn!(
                    "Portrait screens are not supported ({}x{})",
                    fb.x_resolution,
                    fb.y_resolution
                );
                return Err(InitError::PortraitScreen {
                    x_resolution: fb.x_resolution,
                    y_resolution: fb.y_resolution,
                });
            }
        };

        Ok(Self { width, height, offset, scale })
    }

    /// Normalized extent as a vector
    pub const fn normalized_extent(&self) -> Vector {
        Vector::new(self.scale, self.scale)
    }

    /// Convert a normalized vector to canvas space
    pub fn to_canvas(&self, normalized: Vector) -> Vector {
        Vector::new(
            scale_axis(normalized.x, self.width as u64, self.scale as u64),
            scale_axis(normalized.y, self.height as u64, self.scale as u64),
        )
    }

    /// Convert a canvas-space vector back to normalized space
    pub fn to_normalized(&self, physical: Vector) -> Vector {
        Vector::new(
            scale_axis(physical.x, self.scale as u64, self.width as u64),
            scale_axis(physical.y, self.scale as u64, self.height as u64),
        )
    }

    /// Classify a canvas-space point against the canvas bounds
    pub const fn within_canvas(&self, point: Vector) -> Boundary {
        if point.x < self.width && point.y < self.height {
            Boundary::Inside
        } else if point.x <= self.width && point.y <= self.height {
            Boundary::OnBoundary
        } else {
            Boundary::Outside
        }
    }
}
