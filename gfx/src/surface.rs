//! Pixel writer
//!
//! A [`Surface`] is a borrowed framebuffer plus the geometry needed to place
//! canvas coordinates in it. Drawing operations are implemented on it in
//! [`crate::shapes`] and [`crate::blit`].

use core::fmt;
use core::ops::Range;

use bootgfx_hal::firmware::FramebufferDescriptor;

use crate::color::{PackedColor, PixelLayout, RgbColor};
use crate::error::{GfxResult, InitError};
use crate::geometry::{Canvas, Vector};

/// Framebuffer memory with canvas geometry attached
pub struct Surface<'fb> {
    memory: &'fb mut [u8],
    canvas: Canvas,
    layout: PixelLayout,
    x_resolution: usize,
    bytes_per_pixel: usize,
}

impl<'fb> Surface<'fb> {
    /// Wrap framebuffer memory described by `fb`
    ///
    /// `memory` must cover the whole framebuffer (`fb.frame_len()` bytes).
    pub fn new(memory: &'fb mut [u8], fb: &FramebufferDescriptor, canvas: Canvas) -> GfxResult<Self> {
        if !fb.has_supported_layout() {
            log::warn!(
                "Unsupported pixel layout: {} bpp, r={:?} g={:?} b={:?}",
                fb.bits_per_pixel,
                fb.red,
                fb.green,
                fb.blue
            );
            return Err(InitError::UnsupportedPixelLayout.into());
        }

        let required = fb.frame_len().ok_or(InitError::UnsupportedPixelLayout)?;
        if memory.len() < required {
            return Err(InitError::FramebufferTooSmall {
                required,
                provided: memory.len(),
            }
            .into());
        }

        Ok(Self {
            memory,
            canvas,
            layout: PixelLayout::from_descriptor(fb),
            x_resolution: fb.x_resolution as usize,
            bytes_per_pixel: fb.bytes_per_pixel(),
        })
    }

    /// Get the canvas this surface draws on
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Pack a color into this framebuffer's layout
    #[inline]
    pub fn pack(&self, rgb: RgbColor) -> PackedColor {
        self.layout.pack(rgb)
    }

    /// Byte range of the pixel at a canvas coordinate
    #[inline]
    fn pixel_range(&self, at: Vector) -> Option<Range<usize>> {
        let index = (at.y as usize)
            .checked_mul(self.x_resolution)?
            .checked_add(at.x as usize + self.canvas.offset as usize)?;
        let start = index.checked_mul(self.bytes_per_pixel)?;
        Some(start..start + self.bytes_per_pixel)
    }

    /// Plot a pixel at a canvas coordinate
    ///
    /// Called from tight loops; callers validate coordinates against the
    /// canvas first. A write that would land outside the framebuffer memory
    /// is dropped.
    #[inline]
    pub fn set_pixel(&mut self, at: Vector, color: PackedColor) {
        let Some(range) = self.pixel_range(at) else {
            return;
        };
        if let Some(pixel) = self.memory.get_mut(range) {
            for (i, byte) in pixel.iter_mut().enumerate() {
                *byte = color.byte(i);
            }
        }
    }

    /// Read back the pixel at a canvas coordinate
    pub fn pixel(&self, at: Vector) -> Option<PackedColor> {
        let pixel = self.memory.get(self.pixel_range(at)?)?;
        let value = pixel
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &byte)| acc | (u32::from(byte) << (i * 8)));
        Some(PackedColor(value))
    }

    /// Fill the whole framebuffer, including the bars beside the canvas
    pub fn clear_screen(&mut self, rgb: RgbColor) {
        let color = self.pack(rgb);
        let bpp = self.bytes_per_pixel;
        for pixel in self.memory.chunks_exact_mut(bpp) {
            for (i, byte) in pixel.iter_mut().enumerate() {
                *byte = color.byte(i);
            }
        }
    }
}

impl fmt::Debug for Surface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("x_resolution", &self.x_resolution)
            .field("bytes_per_pixel", &self.bytes_per_pixel)
            .field("len", &self.memory.len())
            .finish()
    }
}
