//! File header and info header v3
//!
//! The checks run in a fixed order and each one guards the next: supported
//! header variant, palette fits before the pixel array, declared pixel array
//! size matches the geometry, pixel array fits inside the buffer.

use static_assertions::const_assert_eq;

use super::palette::{Palette, PALETTE_ELEMENT_SIZE};
use super::{read_i32_le, read_u16_le, read_u32_le, round_up};
use crate::error::{GfxError, GfxResult};
use crate::geometry::Vector;

// =============================================================================
// FILE HEADER
// =============================================================================

/// Outer bitmap container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Declared total file size
    pub file_size: u32,
    /// Offset of the pixel array from the start of the buffer
    pub bitmap_offset: u32,
}

impl FileHeader {
    /// Size on the wire
    pub const SIZE: usize = 14;
    /// Required signature
    pub const SIGNATURE: [u8; 2] = *b"BM";

    const FILE_SIZE_FIELD: usize = 2;
    const BITMAP_OFFSET_FIELD: usize = 10;

    /// Validate the container and extract the file header
    ///
    /// The declared file size must equal the buffer length exactly, which
    /// catches both truncated and padded inputs.
    pub fn parse(data: &[u8]) -> GfxResult<Self> {
        if data.len() < Self::SIZE {
            log::warn!("Invalid bitmap data: {} bytes", data.len());
            return Err(GfxError::BitmapDataInvalid);
        }
        if data[..2] != Self::SIGNATURE {
            log::warn!("Bitmap signature mismatch");
            return Err(GfxError::BitmapSignatureMismatch);
        }

        let file_size = read_u32_le(data, Self::FILE_SIZE_FIELD).ok_or(GfxError::BitmapDataInvalid)?;
        if file_size as u64 != data.len() as u64 {
            log::warn!(
                "Bitmap file size {} does not match buffer size {}",
                file_size,
                data.len()
            );
            return Err(GfxError::BitmapDataInvalid);
        }

        let bitmap_offset =
            read_u32_le(data, Self::BITMAP_OFFSET_FIELD).ok_or(GfxError::BitmapDataInvalid)?;

        Ok(Self {
            file_size,
            bitmap_offset,
        })
    }
}

// signature, file size, reserved, pixel offset
const_assert_eq!(FileHeader::BITMAP_OFFSET_FIELD + 4, FileHeader::SIZE);

// =============================================================================
// INFO HEADER V3
// =============================================================================

/// Info header, version 3 (40 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeaderV3 {
    /// Self-reported header size
    pub header_size: u32,
    /// Image width in pixels
    pub width: i32,
    /// Image height (negative = rows stored top-down)
    pub height: i32,
    /// Bits per pixel
    pub bits_per_pixel: u16,
    /// Compression method
    pub compression: u32,
    /// Declared pixel array size in bytes
    pub size: u32,
    /// Number of palette entries
    pub colors_used: u32,
}

impl InfoHeaderV3 {
    /// Size on the wire, and the only header size we accept
    pub const SIZE: usize = 40;
    /// No compression
    pub const BI_RGB: u32 = 0;

    const WIDTH_FIELD: usize = 4;
    const HEIGHT_FIELD: usize = 8;
    const BITS_PER_PIXEL_FIELD: usize = 14;
    const COMPRESSION_FIELD: usize = 16;
    const SIZE_FIELD: usize = 20;
    const COLORS_USED_FIELD: usize = 32;

    /// Check if rows are stored top to bottom
    pub const fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Number of rows
    pub const fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Native size in pixels
    pub const fn dimension(&self) -> Vector {
        Vector::new(self.width.unsigned_abs(), self.abs_height())
    }

    /// Bytes per stored row, padded to 4 bytes
    pub fn row_stride(&self) -> u64 {
        round_up(self.width.unsigned_abs() as u64 * self.bits_per_pixel as u64 / 8, 4)
    }

    fn decode(data: &[u8], offset: usize) -> Option<Self> {
        Some(Self {
            header_size: read_u32_le(data, offset)?,
            width: read_i32_le(data, offset + Self::WIDTH_FIELD)?,
            height: read_i32_le(data, offset + Self::HEIGHT_FIELD)?,
            bits_per_pixel: read_u16_le(data, offset + Self::BITS_PER_PIXEL_FIELD)?,
            compression: read_u32_le(data, offset + Self::COMPRESSION_FIELD)?,
            size: read_u32_le(data, offset + Self::SIZE_FIELD)?,
            colors_used: read_u32_le(data, offset + Self::COLORS_USED_FIELD)?,
        })
    }
}

// colors_used is followed only by colors_important
const_assert_eq!(InfoHeaderV3::COLORS_USED_FIELD + 8, InfoHeaderV3::SIZE);
const_assert_eq!(PALETTE_ELEMENT_SIZE, 4);

/// Validate the info header and locate the palette and pixel array
///
/// Returns views into `data`; nothing is copied.
pub fn parse_header_v3<'a>(
    data: &'a [u8],
    file_header: &FileHeader,
) -> GfxResult<(InfoHeaderV3, Palette<'a>, &'a [u8])> {
    let header_offset = FileHeader::SIZE;
    let palette_offset = (header_offset + InfoHeaderV3::SIZE) as u64;
    let file_size = file_header.file_size as u64;

    let header_size = read_u32_le(data, header_offset).ok_or(GfxError::BitmapDataInvalid)?;
    if header_size as usize != InfoHeaderV3::SIZE {
        log::warn!("Unsupported bitmap format: header size {}", header_size);
        return Err(GfxError::BitmapFormatUnsupported);
    }
    let header = InfoHeaderV3::decode(data, header_offset).ok_or(GfxError::BitmapDataInvalid)?;

    if header.width <= 0 {
        log::warn!("Invalid bitmap width: {}", header.width);
        return Err(GfxError::BitmapDataInvalid);
    }

    let palette_size = header.colors_used as u64 * PALETTE_ELEMENT_SIZE as u64;
    let pixel_offset = file_header.bitmap_offset as u64;
    if pixel_offset > file_size {
        log::warn!("Bitmap pixel data exceeds buffer boundary");
        return Err(GfxError::BitmapDataInvalid);
    }
    if palette_offset + palette_size > pixel_offset {
        log::warn!("Bitmap palette data exceeds palette boundary");
        return Err(GfxError::BitmapDataInvalid);
    }

    let pixel_size = header.size as u64;
    let expected = (header.abs_height() as u64).checked_mul(header.row_stride());
    if expected != Some(pixel_size) {
        log::warn!("Bitmap pixel array size does not match expected size");
        return Err(GfxError::BitmapDataInvalid);
    }
    if pixel_offset + pixel_size > file_size {
        log::warn!("Bitmap pixel array exceeds buffer boundary");
        return Err(GfxError::BitmapDataInvalid);
    }

    let palette = data
        .get(palette_offset as usize..(palette_offset + palette_size) as usize)
        .ok_or(GfxError::BitmapDataInvalid)?;
    let pixels = data
        .get(pixel_offset as usize..(pixel_offset + pixel_size) as usize)
        .ok_or(GfxError::BitmapDataInvalid)?;

    Ok((header, Palette::new(palette), pixels))
}
