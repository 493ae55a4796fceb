//! Color palettes as seen by the document core.
//!
//! The core only consumes the count of valid color indices; actual color
//! values live with the renderer. Index 0 is fully transparent for both
//! foreground and background channels -- a domain convention relied upon by
//! compositing and export logic, not merely a default.

/// A named palette description.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: String,
    /// Number of valid color indices, including transparent at 0.
    pub color_count: u32,
}

impl Palette {
    pub fn new(name: impl Into<String>, color_count: u32) -> Self {
        Self { name: name.into(), color_count }
    }

    /// Normalize a color index for storage: positive out-of-range values wrap
    /// modulo the palette size; 0 is the reserved transparent index and is
    /// never remapped. A zero-color palette is a programming error.
    pub fn normalize(&self, index: u32) -> u32 {
        debug_assert!(self.color_count > 0);
        if index == 0 || index < self.color_count {
            index
        } else {
            index % self.color_count
        }
    }

    /// Built-in 16-color palette (transparent + 15 colors).
    pub fn builtin_c16() -> Self {
        Self::new("c16", 16)
    }
}
