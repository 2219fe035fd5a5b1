//! Shape renderer
//!
//! Solid, axis-aligned boxes. The whole box is validated against the canvas
//! before the first pixel is written.

use crate::color::RgbColor;
use crate::error::{GfxError, GfxResult};
use crate::geometry::Vector;
use crate::surface::Surface;

impl Surface<'_> {
    /// Fill a box given in normalized coordinates
    ///
    /// The far corner may sit exactly on the canvas edge.
    pub fn draw_box(&mut self, top_left_rel: Vector, size_rel: Vector, rgb: RgbColor) -> GfxResult<()> {
        let color = self.pack(rgb);
        let canvas = *self.canvas();

        let top_left = canvas.to_canvas(top_left_rel);
        let size = canvas.to_canvas(size_rel);
        let bottom_right = top_left.add(size);
        if !canvas.within_canvas(bottom_right).is_within() {
            log::warn!("Box exceeds canvas boundary");
            return Err(GfxError::BoundaryExceeded);
        }

        for y in top_left.y..bottom_right.y {
            for x in top_left.x..bottom_right.x {
                self.set_pixel(Vector::new(x, y), color);
            }
        }

        Ok(())
    }

    /// Fill the whole canvas
    pub fn clear_canvas(&mut self, rgb: RgbColor) -> GfxResult<()> {
        let extent = self.canvas().normalized_extent();
        self.draw_box(Vector::ORIGIN, extent, rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;
    use crate::geometry::Canvas;
    use bootgfx_hal::firmware::FramebufferDescriptor;
    use bootgfx_hal::PhysAddr;

    fn setup(x: u32, y: u32) -> (FramebufferDescriptor, Canvas, Vec<u8>) {
        let desc = FramebufferDescriptor::xrgb8888(PhysAddr::new(0), x, y);
        let canvas = Canvas::from_descriptor(&desc, 1000).unwrap();
        let mem = vec![0u8; desc.frame_len().unwrap()];
        (desc, canvas, mem)
    }

    fn count_color(mem: &[u8], color: u32) -> usize {
        mem.chunks_exact(4)
            .filter(|p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]) == color)
            .count()
    }

    #[test]
    fn test_draw_box_fills_exact_region() {
        let (desc, canvas, mut mem) = setup(20, 10);
        let mut surface = Surface::new(&mut mem, &desc, canvas).unwrap();

        // (100, 200) + (300, 500) on a 10px canvas -> x 1..4, y 2..7
        surface
            .draw_box(Vector::new(100, 200), Vector::new(300, 500), RgbColor::WHITE)
            .unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let expected = if (1..4).contains(&x) && (2..7).contains(&y) {
                    PackedColor(0x00FF_FFFF)
                } else {
                    PackedColor(0)
                };
                assert_eq!(surface.pixel(Vector::new(x, y)), Some(expected), "({}, {})", x, y);
            }
        }
        drop(surface);
        assert_eq!(count_color(&mem, 0x00FF_FFFF), 15);
    }

    #[test]
    fn test_box_touching_edge_is_allowed() {
        let (desc, canvas, mut mem) = setup(20, 10);
        let mut surface = Surface::new(&mut mem, &desc, canvas).unwrap();
        assert!(surface
            .draw_box(Vector::new(500, 500), Vector::new(500, 500), RgbColor::RED)
            .is_ok());
        drop(surface);
        assert_eq!(count_color(&mem, 0x00FF_0000), 25);
    }

    #[test]
    fn test_box_past_edge_writes_nothing() {
        let (desc, canvas, mut mem) = setup(20, 10);
        let mut surface = Surface::new(&mut mem, &desc, canvas).unwrap();
        assert_eq!(
            surface.draw_box(Vector::new(500, 0), Vector::new(600, 100), RgbColor::RED),
            Err(GfxError::BoundaryExceeded)
        );
        assert_eq!(
            surface.draw_box(Vector::new(0, 0), Vector::new(100, 1100), RgbColor::RED),
            Err(GfxError::BoundaryExceeded)
        );
        drop(surface);
        assert!(mem.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_canvas_leaves_bars() {
        let (desc, canvas, mut mem) = setup(20, 10);
        let mut surface = Surface::new(&mut mem, &desc, canvas).unwrap();
        surface.clear_canvas(RgbColor::BLUE).unwrap();
        drop(surface);

        assert_eq!(count_color(&mem, 0x0000_00FF), 100);
        for row in mem.chunks_exact(20 * 4) {
            // offset 5: pixels 0..5 and 15..20 are bars
            assert!(row[..5 * 4].iter().all(|&b| b == 0));
            assert!(row[15 * 4..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_empty_box_is_noop() {
        let (desc, canvas, mut mem) = setup(20, 10);
        let mut surface = Surface::new(&mut mem, &desc, canvas).unwrap();
        surface
            .draw_box(Vector::new(300, 300), Vector::new(0, 500), RgbColor::WHITE)
            .unwrap();
        drop(surface);
        assert!(mem.iter().all(|&b| b == 0));
    }
}
