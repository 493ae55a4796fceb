//! Character sets: glyph counts, aspect ratios, and character lookup.
//!
//! The document core never touches glyph pixel data; it only needs to know
//! how many glyph indices are valid, the glyph cell's pixel aspect ratio
//! (tile quads are scaled to match), and how to map a character to an index.

use std::collections::HashMap;

/// A named character set description.
///
/// Index 0 is the blank glyph by convention; compositing and export logic
/// rely on it, so every charset must reserve it.
#[derive(Debug, Clone, PartialEq)]
pub struct Charset {
    pub name: String,
    /// Number of valid glyph indices, including the blank glyph at 0.
    pub glyph_count: u32,
    /// Glyph cell width in pixels.
    pub glyph_width: u32,
    /// Glyph cell height in pixels.
    pub glyph_height: u32,
    /// Character-to-index mapping for text entry and importers.
    mapping: HashMap<char, u32>,
}

impl Charset {
    pub fn new(
        name: impl Into<String>,
        glyph_count: u32,
        glyph_width: u32,
        glyph_height: u32,
        mapping: HashMap<char, u32>,
    ) -> Self {
        Self { name: name.into(), glyph_count, glyph_width, glyph_height, mapping }
    }

    /// Height-over-width ratio of one glyph cell. Text-mode charsets are
    /// usually taller than wide (e.g. 8x16 gives 2.0).
    pub fn quad_aspect(&self) -> f32 {
        self.glyph_height as f32 / self.glyph_width as f32
    }

    /// Glyph index for a character, if the charset maps it.
    pub fn index_of(&self, ch: char) -> Option<u32> {
        self.mapping.get(&ch).copied()
    }

    /// Built-in 8x16 charset covering printable ASCII.
    ///
    /// Index 0 is blank; printable characters start at index 1 in codepoint
    /// order (so `'!'` is 2, since space maps to the blank glyph's slot 1).
    pub fn builtin_ascii() -> Self {
        let mut mapping = HashMap::new();
        for (i, ch) in (' '..='~').enumerate() {
            mapping.insert(ch, i as u32 + 1);
        }
        Self::new("ascii", 96, 8, 16, mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ascii_lookup() {
        let cs = Charset::builtin_ascii();
        assert_eq!(cs.index_of(' '), Some(1));
        assert_eq!(cs.index_of('!'), Some(2));
        assert_eq!(cs.index_of('~'), Some(95));
        assert_eq!(cs.index_of('\u{00e9}'), None);
    }

    #[test]
    fn test_quad_aspect() {
        let cs = Charset::builtin_ascii();
        assert_eq!(cs.quad_aspect(), 2.0);
    }
}
