//! Color model
//!
//! Colors are specified as 8-bit RGB and packed into whatever bit layout the
//! framebuffer uses. Channels narrower than eight bits lose their low bits.

use bootgfx_hal::firmware::{ChannelMask, FramebufferDescriptor};

/// RGB color, no alpha
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
}

impl RgbColor {
    /// Create new color
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create from 24-bit `0xRRGGBB`
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue
    pub const BLUE: Self = Self::new(0, 0, 255);
}

/// A color in the framebuffer's native bit layout
///
/// Stored little-endian in memory: byte `i` of a pixel is bits `8*i..8*i+8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Byte `index` of the packed value
    #[inline]
    pub const fn byte(self, index: usize) -> u8 {
        (self.0 >> (index * 8)) as u8
    }
}

/// Channel layout of a framebuffer pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    red: ChannelMask,
    green: ChannelMask,
    blue: ChannelMask,
}

impl PixelLayout {
    /// Take the channel layout from a descriptor
    ///
    /// The descriptor must have passed
    /// [`FramebufferDescriptor::has_supported_layout`].
    pub const fn from_descriptor(fb: &FramebufferDescriptor) -> Self {
        Self {
            red: fb.red,
            green: fb.green,
            blue: fb.blue,
        }
    }

    /// Pack a color into this layout
    #[inline]
    pub fn pack(&self, rgb: RgbColor) -> PackedColor {
        PackedColor(
            pack_channel(rgb.red, self.red)
                | pack_channel(rgb.green, self.green)
                | pack_channel(rgb.blue, self.blue),
        )
    }
}

#[inline]
fn pack_channel(value: u8, mask: ChannelMask) -> u32 {
    let size = u32::from(mask.size.min(8));
    let truncated = u32::from(value) >> (8 - size);
    truncated.checked_shl(u32::from(mask.position)).unwrap_or(0)
}
