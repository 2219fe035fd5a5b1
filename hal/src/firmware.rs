//! # Firmware Interface Abstraction
//!
//! This module defines what the platform layer reports about the display:
//! a single linear framebuffer described once at startup.

use crate::PhysAddr;

/// Firmware interface abstraction
pub trait FirmwareInterface {
    /// Get the firmware type
    fn firmware_type(&self) -> FirmwareType;

    /// Get the framebuffer descriptor (if the firmware set one up)
    fn framebuffer(&self) -> Option<FramebufferDescriptor>;
}

/// Firmware type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareType {
    /// Legacy BIOS
    Bios,
    /// UEFI
    Uefi,
    /// coreboot-style table handoff
    Coreboot,
    /// Device Tree based (ARM, RISC-V)
    DeviceTree,
    /// Unknown/Other
    Unknown,
}

/// Bit field of one color channel inside a packed pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelMask {
    /// Position of the least significant bit
    pub position: u8,
    /// Width of the field in bits
    pub size: u8,
}

impl ChannelMask {
    /// Create a channel mask
    pub const fn new(position: u8, size: u8) -> Self {
        Self { position, size }
    }

    /// Build from a contiguous bit mask such as `0x00FF_0000`
    pub const fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            return Self::new(0, 0);
        }
        let position = mask.trailing_zeros();
        let size = 32 - mask.leading_zeros() - position;
        Self::new(position as u8, size as u8)
    }

    /// Check whether an 8-bit channel can be packed into this field
    pub const fn is_packable(&self) -> bool {
        self.size <= 8 && (self.position as u32 + self.size as u32) <= 32
    }
}

/// Framebuffer information handed over by firmware
///
/// Read-only for the graphics core. Rows are `x_resolution` pixels apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferDescriptor {
    /// Physical address of the framebuffer
    pub address: PhysAddr,
    /// Horizontal resolution in pixels
    pub x_resolution: u32,
    /// Vertical resolution in pixels
    pub y_resolution: u32,
    /// Bits per pixel
    pub bits_per_pixel: u8,
    /// Red channel field
    pub red: ChannelMask,
    /// Green channel field
    pub green: ChannelMask,
    /// Blue channel field
    pub blue: ChannelMask,
}

impl FramebufferDescriptor {
    /// Common 32-bit XRGB layout (blue in the lowest byte)
    pub const fn xrgb8888(address: PhysAddr, x_resolution: u32, y_resolution: u32) -> Self {
        Self {
            address,
            x_resolution,
            y_resolution,
            bits_per_pixel: 32,
            red: ChannelMask::new(16, 8),
            green: ChannelMask::new(8, 8),
            blue: ChannelMask::new(0, 8),
        }
    }

    /// 16-bit RGB 565 layout
    pub const fn rgb565(address: PhysAddr, x_resolution: u32, y_resolution: u32) -> Self {
        Self {
            address,
            x_resolution,
            y_resolution,
            bits_per_pixel: 16,
            red: ChannelMask::new(11, 5),
            green: ChannelMask::new(5, 6),
            blue: ChannelMask::new(0, 5),
        }
    }

    /// Get bytes per pixel
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Total size of the framebuffer in bytes, `None` on overflow
    pub fn frame_len(&self) -> Option<usize> {
        (self.x_resolution as usize)
            .checked_mul(self.y_resolution as usize)?
            .checked_mul(self.bytes_per_pixel())
    }

    /// Check whether every channel fits a pixel the core can write
    pub const fn has_supported_layout(&self) -> bool {
        matches!(self.bits_per_pixel, 8 | 16 | 24 | 32)
            && self.red.is_packable()
            && self.green.is_packable()
            && self.blue.is_packable()
    }
}
