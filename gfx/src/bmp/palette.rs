//! Color table

use crate::color::RgbColor;

/// Bytes per palette element: blue, green, red, reserved
pub(crate) const PALETTE_ELEMENT_SIZE: usize = 4;

/// Borrowed view of a bitmap's color table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<'a> {
    entries: &'a [u8],
}

impl<'a> Palette<'a> {
    /// Wrap raw palette bytes
    pub const fn new(entries: &'a [u8]) -> Self {
        Self { entries }
    }

    /// Number of complete entries
    pub const fn len(&self) -> usize {
        self.entries.len() / PALETTE_ELEMENT_SIZE
    }

    /// Check if the palette has no entries
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a palette index
    pub fn color(&self, index: usize) -> Option<RgbColor> {
        let start = index.checked_mul(PALETTE_ELEMENT_SIZE)?;
        let entry = self.entries.get(start..start + PALETTE_ELEMENT_SIZE)?;
        Some(RgbColor::new(entry[2], entry[1], entry[0]))
    }
}
