//! # bootgfx - Pre-boot Canvas Graphics
//!
//! Draws solid boxes and palette bitmaps onto a linear framebuffer before any
//! operating system is running.
//!
//! ## Coordinate Model
//!
//! Callers position everything in a resolution-independent **normalized**
//! space (`0..=1000` by default on both axes). The engine maps it onto a
//! square **canvas** in the middle of the landscape screen:
//!
//! ```text
//! +-----+-------------------+-----+
//! | bar |                   | bar |
//! |     |      canvas       |     |
//! |     |  height x height  |     |
//! |     |                   |     |
//! +-----+-------------------+-----+
//!  offset
//! ```
//!
//! ## Layers
//!
//! - [`geometry`]: normalized/canvas conversion and boundary checks
//! - [`color`]: RGB to framebuffer pixel packing
//! - [`surface`]: the pixel writer over borrowed framebuffer memory
//! - [`bmp`]: zero-copy parsing of 8-bit palette bitmaps
//! - [`context`]: lazy initialization from the platform's firmware tables
//!
//! Boxes and bitmaps are drawn by methods on [`Surface`]; [`RenderContext`]
//! forwards to them once the framebuffer is mapped.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod bmp;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod surface;

mod blit;
mod shapes;

#[cfg(test)]
mod testing;

pub use bmp::{parse_header_v3, Bitmap, FileHeader, InfoHeaderV3, Palette};
pub use color::{PackedColor, PixelLayout, RgbColor};
pub use config::{Config, BITMAP_SCALE_BASE, CANVAS_SCALE};
pub use context::RenderContext;
pub use error::{result_code, GfxError, GfxResult, InitError, SUCCESS};
pub use geometry::{Boundary, Canvas, Vector};
pub use surface::Surface;
