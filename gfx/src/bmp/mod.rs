//! Palette bitmap decoding
//!
//! Parses the uncompressed, 8-bit palette variant of the Windows bitmap
//! format straight out of a caller-supplied buffer. Nothing is copied: the
//! palette and the pixel array are views into the original bytes.
//!
//! # Layout
//!
//! ```text
//! offset 0    file header (14 bytes)   "BM", file size, pixel array offset
//! offset 14   info header v3 (40 bytes) geometry, depth, compression, ...
//! offset 54   palette                  colors_used * 4 bytes (B, G, R, 0)
//! ...         (gap allowed)
//! bitmap_offset pixel array            rows padded to 4 bytes
//! ```
//!
//! All multi-byte fields are little-endian regardless of host byte order.
//! Every field is decoded explicitly in one place per structure.

mod header;
mod palette;

pub use header::{parse_header_v3, FileHeader, InfoHeaderV3};
pub use palette::Palette;

use crate::error::GfxResult;
use crate::geometry::Vector;

/// A validated bitmap, borrowing the buffer it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    /// Outer container header
    pub file_header: FileHeader,
    /// Info header
    pub header: InfoHeaderV3,
    /// Color table
    pub palette: Palette<'a>,
    /// Raw indexed scanlines
    pub pixels: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Parse and validate a complete bitmap buffer
    pub fn parse(data: &'a [u8]) -> GfxResult<Self> {
        let file_header = FileHeader::parse(data)?;
        let (header, palette, pixels) = parse_header_v3(data, &file_header)?;
        Ok(Self {
            file_header,
            header,
            palette,
            pixels,
        })
    }

    /// Native size in pixels
    pub fn dimension(&self) -> Vector {
        self.header.dimension()
    }
}

/// Round `value` up to the next multiple of `align`
#[inline]
pub(crate) const fn round_up(value: u64, align: u64) -> u64 {
    value.div_ceil(align) * align
}

#[inline]
fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[inline]
fn read_i32_le(data: &[u8], offset: usize) -> Option<i32> {
    read_u32_le(data, offset).map(|v| v as i32)
}
