//! # Render Context
//!
//! The entry point firmware code talks to. A [`RenderContext`] borrows the
//! platform, sets up the canvas on first use and hands every draw request to
//! a [`Surface`] over the mapped framebuffer.
//!
//! Initialization runs at most once successfully. A failed attempt leaves the
//! context uninitialized and is repeated by the next call, so a display that
//! shows up late is still picked up.

use core::fmt;

use bootgfx_hal::firmware::{FirmwareInterface, FramebufferDescriptor};
use bootgfx_hal::mmu::{MapFlags, PhysMapper};
use bootgfx_hal::{Platform, VirtAddr};
use spin::Once;

use crate::blit;
use crate::color::RgbColor;
use crate::config::Config;
use crate::error::{GfxResult, InitError};
use crate::geometry::{Canvas, Vector};
use crate::surface::Surface;

/// Mapped framebuffer and the canvas derived from it
#[derive(Debug, Clone, Copy)]
struct FrameMapping {
    descriptor: FramebufferDescriptor,
    canvas: Canvas,
    base: VirtAddr,
    len: usize,
}

/// Lazily initialized drawing context over a platform's framebuffer
pub struct RenderContext<'p, P: Platform> {
    platform: &'p P,
    config: Config,
    frame: Once<FrameMapping>,
}

impl<'p, P: Platform> RenderContext<'p, P> {
    /// Create a context with the default configuration
    pub const fn new(platform: &'p P) -> Self {
        Self::with_config(platform, Config::new())
    }

    /// Create a context with an explicit configuration
    pub const fn with_config(platform: &'p P, config: Config) -> Self {
        Self {
            platform,
            config,
            frame: Once::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize the canvas if that has not happened yet
    pub fn init(&self) -> GfxResult<&Canvas> {
        Ok(&self.mapping()?.canvas)
    }

    /// Get the canvas, if initialization has succeeded
    pub fn canvas(&self) -> Option<&Canvas> {
        self.frame.get().map(|frame| &frame.canvas)
    }

    /// Fill a box given in normalized coordinates
    pub fn draw_box(&mut self, top_left: Vector, size: Vector, rgb: RgbColor) -> GfxResult<()> {
        if self.config.trace_draws {
            log::debug!("draw_box: top_left={:?} size={:?} color={:?}", top_left, size, rgb);
        }
        self.surface()?.draw_box(top_left, size, rgb)
    }

    /// Fill the whole canvas
    pub fn clear_canvas(&mut self, rgb: RgbColor) -> GfxResult<()> {
        if self.config.trace_draws {
            log::debug!("clear_canvas: color={:?}", rgb);
        }
        self.surface()?.clear_canvas(rgb)
    }

    /// Fill the whole screen, bars included
    pub fn clear_screen(&mut self, rgb: RgbColor) -> GfxResult<()> {
        if self.config.trace_draws {
            log::debug!("clear_screen: color={:?}", rgb);
        }
        self.surface()?.clear_screen(rgb);
        Ok(())
    }

    /// Draw a bitmap with its top-left corner at a normalized position
    pub fn draw_bitmap(&mut self, top_left: Vector, scale_rel: u32, data: &[u8]) -> GfxResult<()> {
        if self.config.trace_draws {
            log::debug!(
                "draw_bitmap: top_left={:?} scale={} bytes={}",
                top_left,
                scale_rel,
                data.len()
            );
        }
        self.surface()?.draw_bitmap(top_left, scale_rel, data)
    }

    /// Normalized extent a bitmap would cover when drawn at `scale_rel`
    pub fn bitmap_dimension(&self, data: &[u8], scale_rel: u32) -> GfxResult<Vector> {
        let canvas = self.init()?;
        blit::bitmap_dimension(canvas, data, scale_rel)
    }

    fn mapping(&self) -> GfxResult<&FrameMapping> {
        Ok(self.frame.try_call_once(|| self.map_frame())?)
    }

    fn map_frame(&self) -> Result<FrameMapping, InitError> {
        let descriptor = self.platform.firmware().framebuffer().ok_or_else(|| {
            log::warn!("No framebuffer reported by firmware");
            InitError::NoFramebuffer
        })?;

        let canvas = Canvas::from_descriptor(&descriptor, self.config.canvas_scale)?;

        if !descriptor.has_supported_layout() {
            log::warn!("Unsupported pixel layout: {} bpp", descriptor.bits_per_pixel);
            return Err(InitError::UnsupportedPixelLayout);
        }
        let len = descriptor.frame_len().ok_or(InitError::UnsupportedPixelLayout)?;

        let base = self
            .platform
            .mapper()
            .map(descriptor.address, len, MapFlags::framebuffer())
            .map_err(|e| {
                log::warn!("Failed to map framebuffer at {:#x}: {}", descriptor.address, e);
                InitError::MappingFailed(e)
            })?;

        log::info!(
            "Canvas initialized: width={} height={} offset={}",
            canvas.width,
            canvas.height,
            canvas.offset
        );

        Ok(FrameMapping {
            descriptor,
            canvas,
            base,
            len,
        })
    }

    /// Borrow the framebuffer for one draw call
    fn surface(&mut self) -> GfxResult<Surface<'_>> {
        let frame = *self.mapping()?;
        // SAFETY: the mapper guarantees `len` bytes at `base` are valid and
        // unaliased for as long as it lives, which outlives `'p`. The slice
        // is tied to `&mut self`, so only one surface exists at a time.
        let memory = unsafe { core::slice::from_raw_parts_mut(frame.base.as_mut_ptr::<u8>(), frame.len) };
        Surface::new(memory, &frame.descriptor, frame.canvas)
    }
}

impl<P: Platform> fmt::Debug for RenderContext<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("config", &self.config)
            .field("canvas", &self.canvas())
            .finish_non_exhaustive()
    }
}
