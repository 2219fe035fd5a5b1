//! # bootgfx HAL - Platform Collaborators
//!
//! This crate defines the interfaces the canvas engine needs from the
//! platform it runs on, and nothing more:
//!
//! - **Firmware tables**: where the framebuffer lives and how its pixels are
//!   laid out ([`firmware::FramebufferDescriptor`])
//! - **Memory mapping**: turning the framebuffer's physical address into
//!   something the CPU may read and write ([`mmu::PhysMapper`])
//!
//! Discovery of those tables and the page-table work behind a mapping stay
//! with the platform layer. The graphics core only borrows the results.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod firmware;
pub mod mmu;

use core::fmt;

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;

/// Errors that can occur in HAL operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// The operation is not supported on this platform
    NotSupported,
    /// Invalid parameter provided
    InvalidParameter,
    /// Address is invalid or the range wraps around
    InvalidAddress,
    /// Feature not initialized
    NotInitialized,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "Operation not supported"),
            Self::InvalidParameter => write!(f, "Invalid parameter"),
            Self::InvalidAddress => write!(f, "Invalid address"),
            Self::NotInitialized => write!(f, "Not initialized"),
        }
    }
}

/// Everything the canvas engine needs from the platform layer
///
/// Mirrors the way a full HAL aggregates its sub-interfaces, reduced to the
/// two collaborators a pre-boot renderer depends on.
pub trait Platform {
    /// The firmware table interface
    type Firmware: firmware::FirmwareInterface;

    /// The physical memory mapper
    type Mapper: mmu::PhysMapper;

    /// Get the firmware table interface
    fn firmware(&self) -> &Self::Firmware;

    /// Get the physical memory mapper
    fn mapper(&self) -> &Self::Mapper;
}

/// Physical address type (architecture-independent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Create a new physical address
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw address value
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Add an offset to the address, `None` on wrap-around
    #[inline]
    pub const fn checked_add(self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Virtual address type (architecture-independent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(u64);

impl VirtAddr {
    /// Create a new virtual address
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw address value
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Convert to a raw mutable pointer
    #[inline]
    pub const fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }
}

impl fmt::LowerHex for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
