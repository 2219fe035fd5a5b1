//! Bitmap blitter
//!
//! Scales a parsed palette bitmap with nearest-neighbor sampling and writes
//! it through the pixel writer. We scan the destination rectangle and look up
//! the source pixel for every destination pixel.

use crate::bmp::{Bitmap, InfoHeaderV3, Palette};
use crate::config::BITMAP_SCALE_BASE;
use crate::error::{GfxError, GfxResult};
use crate::geometry::{Canvas, Vector};
use crate::surface::Surface;

/// Convert a normalized scale into a scale relative to the image width
///
/// A normalized scale equal to the image's width in normalized units draws
/// the image at its native pixel size on this canvas.
fn image_scale(canvas: &Canvas, scale_rel: u32, header: &InfoHeaderV3) -> GfxResult<u64> {
    let numerator = (scale_rel as u64)
        .checked_mul(canvas.width as u64)
        .and_then(|v| v.checked_mul(BITMAP_SCALE_BASE as u64))
        .ok_or(GfxError::ScaleOutOfRange)?;
    let denominator = canvas.scale as u64 * header.width.unsigned_abs() as u64;
    if denominator == 0 {
        return Err(GfxError::BitmapDataInvalid);
    }
    Ok(numerator / denominator)
}

/// Normalized extent of a bitmap drawn at `scale_rel` on `canvas`
pub(crate) fn bitmap_dimension(canvas: &Canvas, data: &[u8], scale_rel: u32) -> GfxResult<Vector> {
    let bitmap = Bitmap::parse(data)?;

    let scale = image_scale(canvas, scale_rel, &bitmap.header)?;
    if scale == 0 {
        return Err(GfxError::ScaleOutOfRange);
    }
    let image = bitmap.dimension().scale(scale, BITMAP_SCALE_BASE as u64);
    Ok(canvas.to_normalized(image))
}

impl Surface<'_> {
    /// Draw a bitmap with its top-left corner at a normalized position
    ///
    /// Nothing is drawn unless the buffer parses cleanly and the scaled image
    /// fits on the canvas.
    pub fn draw_bitmap(&mut self, top_left_rel: Vector, scale_rel: u32, data: &[u8]) -> GfxResult<()> {
        let bitmap = Bitmap::parse(data)?;
        let canvas = *self.canvas();

        let top_left = canvas.to_canvas(top_left_rel);
        let scale = image_scale(&canvas, scale_rel, &bitmap.header)?;
        let image = bitmap.dimension().scale(scale, BITMAP_SCALE_BASE as u64);

        if !canvas.within_canvas(top_left.add(image)).is_within() {
            log::warn!("Bitmap image exceeds canvas boundary");
            return Err(GfxError::BoundaryExceeded);
        }

        self.draw_bitmap_v3(top_left, scale, image, &bitmap.header, &bitmap.palette, bitmap.pixels)
    }

    /// Normalized extent a bitmap would cover when drawn at `scale_rel`
    pub fn bitmap_dimension(&self, data: &[u8], scale_rel: u32) -> GfxResult<Vector> {
        bitmap_dimension(self.canvas(), data, scale_rel)
    }

    /// Blit a parsed 8-bit palette bitmap
    ///
    /// `top_left` and `image` are in canvas space; `image` is the already
    /// scaled destination size and must have been checked against the canvas
    /// by the caller. `scale` is relative to [`BITMAP_SCALE_BASE`].
    ///
    /// A source offset past the pixel array ends the blit successfully: the
    /// integer scaling may legitimately step past the last row. A palette
    /// index past `colors_used` aborts with [`GfxError::BitmapDataInvalid`],
    /// leaving the pixels drawn so far in place.
    pub fn draw_bitmap_v3(
        &mut self,
        top_left: Vector,
        scale: u64,
        image: Vector,
        header: &InfoHeaderV3,
        palette: &Palette<'_>,
        pixels: &[u8],
    ) -> GfxResult<()> {
        let bpp = header.bits_per_pixel;

        if header.compression != InfoHeaderV3::BI_RGB {
            log::warn!("Compressed bitmaps are not supported");
            return Err(GfxError::BitmapFormatUnsupported);
        }
        if bpp >= 16 {
            log::warn!("Non-palette bitmaps are not supported");
            return Err(GfxError::BitmapFormatUnsupported);
        }
        if bpp != 8 {
            log::warn!("Unsupported bits per pixel: {}", bpp);
            return Err(GfxError::BitmapFormatUnsupported);
        }
        if scale == 0 {
            log::warn!("Scaling out of range");
            return Err(GfxError::ScaleOutOfRange);
        }

        let y_stride = header.row_stride();
        let limit = (header.size as u64).min(pixels.len() as u64);
        let base = BITMAP_SCALE_BASE as u64;

        for dy in 0..image.y {
            // Negative height: rows stored top to bottom. Positive height:
            // bottom to top, so source row 0 lands on the last canvas row.
            let y = if header.is_top_down() {
                top_left.y.saturating_add(dy)
            } else {
                top_left.y.saturating_add(image.y - 1 - dy)
            };
            let sy = dy as u64 * base / scale;
            let row = sy.checked_mul(y_stride);

            for dx in 0..image.x {
                let sx = dx as u64 * base / scale;
                let source = row
                    .and_then(|r| r.checked_add(sx))
                    .filter(|&offset| offset < limit)
                    .and_then(|offset| pixels.get(offset as usize));
                let Some(&index) = source else {
                    log::trace!("Bitmap scan stopped at source row {}", sy);
                    return Ok(());
                };

                let rgb = match palette.color(index as usize) {
                    Some(rgb) if u32::from(index) < header.colors_used => rgb,
                    _ => {
                        log::warn!("Color index {} exceeds palette boundary", index);
                        return Err(GfxError::BitmapDataInvalid);
                    }
                };

                let color = self.pack(rgb);
                self.set_pixel(Vector::new(top_left.x.saturating_add(dx), y), color);
            }
        }

        Ok(())
    }
}
