//! Renderer configuration

/// Extent of the normalized coordinate space on both axes
pub const CANVAS_SCALE: u32 = 1000;

/// Fixed-point base for bitmap scale factors (128 = 50%, 512 = 200%)
///
/// A power of two so the scale arithmetic reduces to shifts.
pub const BITMAP_SCALE_BASE: u32 = 256;

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Normalized extent mapped onto the full canvas
    pub canvas_scale: u32,
    /// Log every draw request at debug level
    pub trace_draws: bool,
}

impl Config {
    /// Create default configuration
    pub const fn new() -> Self {
        Self {
            canvas_scale: CANVAS_SCALE,
            trace_draws: false,
        }
    }

    /// Use a different normalized extent
    pub const fn with_canvas_scale(mut self, canvas_scale: u32) -> Self {
        self.canvas_scale = canvas_scale;
        self
    }

    /// Enable or disable per-draw debug logging
    pub const fn with_trace_draws(mut self, trace_draws: bool) -> Self {
        self.trace_draws = trace_draws;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
