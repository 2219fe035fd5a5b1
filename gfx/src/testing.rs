//! Test fixtures: in-memory bitmap writer and a fake platform

use core::cell::{Cell, UnsafeCell};

use bootgfx_hal::firmware::{FirmwareInterface, FirmwareType, FramebufferDescriptor};
use bootgfx_hal::mmu::{MapFlags, PhysMapper};
use bootgfx_hal::{HalError, HalResult, PhysAddr, Platform, VirtAddr};

use crate::bmp::round_up;

/// Writes bitmap blobs, well-formed unless told otherwise
pub(crate) struct BitmapBuilder {
    width: i32,
    height: i32,
    bits_per_pixel: u16,
    header_size: u32,
    compression: u32,
    palette: Vec<(u8, u8, u8)>,
    colors_used: Option<u32>,
    rows: Vec<Vec<u8>>,
    bitmap_offset: Option<u32>,
    declared_size: Option<u32>,
    gap: usize,
    truncate_pixels: Option<usize>,
}

impl BitmapBuilder {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel: 8,
            header_size: 40,
            compression: 0,
            palette: Vec::new(),
            colors_used: None,
            rows: Vec::new(),
            bitmap_offset: None,
            declared_size: None,
            gap: 0,
            truncate_pixels: None,
        }
    }

    /// Palette entries as (red, green, blue)
    pub(crate) fn palette(mut self, entries: &[(u8, u8, u8)]) -> Self {
        self.palette = entries.to_vec();
        self
    }

    /// Rows in storage order, unpadded
    pub(crate) fn rows(mut self, rows: &[&[u8]]) -> Self {
        self.rows = rows.iter().map(|r| r.to_vec()).collect();
        self
    }

    pub(crate) fn bits_per_pixel(mut self, bpp: u16) -> Self {
        self.bits_per_pixel = bpp;
        self
    }

    pub(crate) fn header_size(mut self, size: u32) -> Self {
        self.header_size = size;
        self
    }

    pub(crate) fn compression(mut self, compression: u32) -> Self {
        self.compression = compression;
        self
    }

    pub(crate) fn colors_used(mut self, count: u32) -> Self {
        self.colors_used = Some(count);
        self
    }

    pub(crate) fn bitmap_offset(mut self, offset: u32) -> Self {
        self.bitmap_offset = Some(offset);
        self
    }

    pub(crate) fn declared_size(mut self, size: u32) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Unused bytes between palette and pixel array
    pub(crate) fn gap(mut self, bytes: usize) -> Self {
        self.gap = bytes;
        self
    }

    /// Keep only the first `len` bytes of the pixel array
    pub(crate) fn truncate_pixels(mut self, len: usize) -> Self {
        self.truncate_pixels = Some(len);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let width = self.width.max(0) as u64;
        let rows = self.height.unsigned_abs() as usize;
        let stride = round_up(width * self.bits_per_pixel as u64 / 8, 4) as usize;

        let mut pixels = vec![0u8; stride * rows];
        for (y, row) in self.rows.iter().enumerate().take(rows) {
            let n = row.len().min(stride);
            pixels[y * stride..y * stride + n].copy_from_slice(&row[..n]);
        }
        let size = pixels.len() as u32;
        if let Some(len) = self.truncate_pixels {
            pixels.truncate(len);
        }

        let offset = 54 + self.palette.len() * 4 + self.gap;
        let colors_used = self.colors_used.unwrap_or(self.palette.len() as u32);

        let mut buf = Vec::with_capacity(offset + pixels.len());
        buf.extend_from_slice(b"BM");
        buf.extend_from_slice(&0u32.to_le_bytes()); // patched below
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&self.bitmap_offset.unwrap_or(offset as u32).to_le_bytes());

        buf.extend_from_slice(&self.header_size.to_le_bytes());
        buf.extend_from_slice(&self.width.to_le_bytes());
        buf.extend_from_slice(&self.height.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        buf.extend_from_slice(&self.compression.to_le_bytes());
        buf.extend_from_slice(&self.declared_size.unwrap_or(size).to_le_bytes());
        buf.extend_from_slice(&2835i32.to_le_bytes());
        buf.extend_from_slice(&2835i32.to_le_bytes());
        buf.extend_from_slice(&colors_used.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());

        for &(r, g, b) in &self.palette {
            buf.extend_from_slice(&[b, g, r, 0]);
        }
        buf.resize(buf.len() + self.gap, 0);
        buf.extend_from_slice(&pixels);

        let file_size = buf.len() as u32;
        buf[2..6].copy_from_slice(&file_size.to_le_bytes());
        buf
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Firmware that reports a fixed descriptor, counting queries
pub(crate) struct TestFirmware {
    pub(crate) descriptor: Cell<Option<FramebufferDescriptor>>,
    pub(crate) queries: Cell<u32>,
}

impl FirmwareInterface for TestFirmware {
    fn firmware_type(&self) -> FirmwareType {
        FirmwareType::Unknown
    }

    fn framebuffer(&self) -> Option<FramebufferDescriptor> {
        self.queries.set(self.queries.get() + 1);
        self.descriptor.get()
    }
}

/// Mapper handing out a heap buffer in place of device memory
pub(crate) struct BufferMapper {
    memory: UnsafeCell<Vec<u8>>,
    pub(crate) fail: Cell<Option<HalError>>,
}

impl BufferMapper {
    /// Copy of the buffer; only call while no surface is alive
    pub(crate) fn contents(&self) -> Vec<u8> {
        // SAFETY: single-threaded tests, no surface borrows the buffer here
        unsafe { (*self.memory.get()).clone() }
    }
}

// SAFETY: the buffer lives as long as the mapper and is only reached through
// the returned address while a surface exists.
unsafe impl PhysMapper for BufferMapper {
    fn map(&self, _phys: PhysAddr, len: usize, _flags: MapFlags) -> HalResult<VirtAddr> {
        if let Some(e) = self.fail.get() {
            return Err(e);
        }
        // SAFETY: see above
        let memory = unsafe { &mut *self.memory.get() };
        if len == 0 || len > memory.len() {
            return Err(HalError::InvalidParameter);
        }
        Ok(VirtAddr::new(memory.as_mut_ptr() as u64))
    }
}

pub(crate) struct TestPlatform {
    pub(crate) firmware: TestFirmware,
    pub(crate) mapper: BufferMapper,
}

impl TestPlatform {
    /// XRGB8888 screen with matching backing memory
    pub(crate) fn xrgb(x: u32, y: u32) -> Self {
        let descriptor = FramebufferDescriptor::xrgb8888(PhysAddr::new(0xE000_0000), x, y);
        Self::with_descriptor(Some(descriptor), (x * y * 4) as usize)
    }

    pub(crate) fn with_descriptor(descriptor: Option<FramebufferDescriptor>, len: usize) -> Self {
        Self {
            firmware: TestFirmware {
                descriptor: Cell::new(descriptor),
                queries: Cell::new(0),
            },
            mapper: BufferMapper {
                memory: UnsafeCell::new(vec![0u8; len]),
                fail: Cell::new(None),
            },
        }
    }
}

impl Platform for TestPlatform {
    type Firmware = TestFirmware;
    type Mapper = BufferMapper;

    fn firmware(&self) -> &TestFirmware {
        &self.firmware
    }

    fn mapper(&self) -> &BufferMapper {
        &self.mapper
    }
}
