//! # Physical Memory Mapping
//!
//! Pre-boot environments differ in how physical memory is reached: identity
//! mapped, offset mapped, or through a window set up on demand. The graphics
//! core only asks for a CPU-accessible view of one physical range.

use crate::{HalError, HalResult, PhysAddr, VirtAddr};
use bitflags::bitflags;

bitflags! {
    /// Attributes requested for a mapping
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MapFlags: u32 {
        /// Mapping must be writable
        const WRITABLE = 1 << 0;
        /// Writes may be combined (typical for framebuffers)
        const WRITE_COMBINING = 1 << 1;
        /// Caching is disabled
        const NO_CACHE = 1 << 2;
    }
}

impl MapFlags {
    /// Flags for a linear framebuffer
    pub const fn framebuffer() -> Self {
        Self::WRITABLE.union(Self::WRITE_COMBINING)
    }
}

/// Turns physical ranges into CPU-accessible virtual ranges
///
/// # Safety
///
/// A successful [`PhysMapper::map`] must return an address where `len` bytes
/// are valid for reads and writes for as long as the mapper is alive, and
/// that range must not be reachable through any other Rust reference while
/// the caller uses it.
pub unsafe trait PhysMapper {
    /// Map `len` bytes starting at `phys`
    fn map(&self, phys: PhysAddr, len: usize, flags: MapFlags) -> HalResult<VirtAddr>;
}

/// Mapper for "virtual = physical + fixed offset" address spaces
///
/// Covers identity mapping (offset 0) and higher-half direct maps.
#[derive(Debug, Clone, Copy)]
pub struct OffsetMapper {
    offset: u64,
}

impl OffsetMapper {
    /// Create an offset mapper
    ///
    /// # Safety
    ///
    /// Every physical range later passed to [`PhysMapper::map`] must be
    /// mapped at `physical + offset` with the requested attributes, and
    /// nothing else may hold references into it.
    pub const unsafe fn new(offset: u64) -> Self {
        Self { offset }
    }

    /// Get the configured offset
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}

// SAFETY: upheld by the contract of `OffsetMapper::new`.
unsafe impl PhysMapper for OffsetMapper {
    fn map(&self, phys: PhysAddr, len: usize, _flags: MapFlags) -> HalResult<VirtAddr> {
        if len == 0 {
            return Err(HalError::InvalidParameter);
        }
        let start = phys
            .as_u64()
            .checked_add(self.offset)
            .ok_or(HalError::InvalidAddress)?;
        start
            .checked_add(len as u64 - 1)
            .ok_or(HalError::InvalidAddress)?;
        Ok(VirtAddr::new(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_flags() {
        let flags = MapFlags::framebuffer();
        assert!(flags.contains(MapFlags::WRITABLE));
        assert!(flags.contains(MapFlags::WRITE_COMBINING));
        assert!(!flags.contains(MapFlags::NO_CACHE));
    }

    #[test]
    fn test_offset_mapping() {
        let mapper = unsafe { OffsetMapper::new(0xFFFF_8000_0000_0000) };
        let virt = mapper
            .map(PhysAddr::new(0xE000_0000), 4096, MapFlags::framebuffer())
            .unwrap();
        assert_eq!(virt.as_u64(), 0xFFFF_8000_E000_0000);
    }

    #[test]
    fn test_offset_mapping_rejects_bad_ranges() {
        let mapper = unsafe { OffsetMapper::new(0) };
        assert_eq!(
            mapper.map(PhysAddr::new(0x1000), 0, MapFlags::WRITABLE),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            mapper.map(PhysAddr::new(u64::MAX - 1), 4, MapFlags::WRITABLE),
            Err(HalError::InvalidAddress)
        );
    }
}
