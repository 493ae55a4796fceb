//! Tile orientation transforms and their texture-coordinate orderings.

use serde::{Deserialize, Serialize};

/// Orientation applied to a glyph's texture sampling.
///
/// Eight discrete states: identity, three rotations, two axis flips, and two
/// flipped-rotation composites. Serialized as an integer 0-7 in document files;
/// a missing `xform` field deserializes to [`TileTransform::Normal`] for
/// backward compatibility with older files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TileTransform {
    /// Upright, unmirrored
    #[default]
    Normal,
    /// Rotated 90 degrees clockwise
    Rotate90,
    /// Rotated 180 degrees
    Rotate180,
    /// Rotated 270 degrees clockwise
    Rotate270,
    /// Mirrored across the vertical axis
    FlipX,
    /// Mirrored across the horizontal axis
    FlipY,
    /// Mirrored then rotated 90 degrees
    Flip90,
    /// Mirrored then rotated 270 degrees
    Flip270,
}

/// All eight transforms in serialization order.
pub const ALL_TRANSFORMS: [TileTransform; 8] = [
    TileTransform::Normal,
    TileTransform::Rotate90,
    TileTransform::Rotate180,
    TileTransform::Rotate270,
    TileTransform::FlipX,
    TileTransform::FlipY,
    TileTransform::Flip90,
    TileTransform::Flip270,
];

impl From<TileTransform> for u8 {
    fn from(t: TileTransform) -> u8 {
        match t {
            TileTransform::Normal => 0,
            TileTransform::Rotate90 => 1,
            TileTransform::Rotate180 => 2,
            TileTransform::Rotate270 => 3,
            TileTransform::FlipX => 4,
            TileTransform::FlipY => 5,
            TileTransform::Flip90 => 6,
            TileTransform::Flip270 => 7,
        }
    }
}

impl TryFrom<u8> for TileTransform {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        ALL_TRANSFORMS
            .get(v as usize)
            .copied()
            .ok_or_else(|| format!("invalid transform index {} (expected 0-7)", v))
    }
}

/// Glyph-quad corner UVs in vertex order (top-left, top-right, bottom-left,
/// bottom-right), with `(0, 0)` the glyph's top-left texel.
type UvOrder = [[f32; 2]; 4];

const UV_NORMAL: UvOrder = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
const UV_ROTATE90: UvOrder = [[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]];
const UV_ROTATE180: UvOrder = [[1.0, 1.0], [0.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
const UV_ROTATE270: UvOrder = [[1.0, 0.0], [1.0, 1.0], [0.0, 0.0], [0.0, 1.0]];
const UV_FLIPX: UvOrder = [[1.0, 0.0], [0.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const UV_FLIPY: UvOrder = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];
const UV_FLIP90: UvOrder = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
const UV_FLIP270: UvOrder = [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]];

impl TileTransform {
    /// Texture-coordinate ordering for this orientation. Pure lookup data
    /// consumed when channel buffers are built for the renderer.
    pub fn uv_order(self) -> UvOrder {
        match self {
            TileTransform::Normal => UV_NORMAL,
            TileTransform::Rotate90 => UV_ROTATE90,
            TileTransform::Rotate180 => UV_ROTATE180,
            TileTransform::Rotate270 => UV_ROTATE270,
            TileTransform::FlipX => UV_FLIPX,
            TileTransform::FlipY => UV_FLIPY,
            TileTransform::Flip90 => UV_FLIP90,
            TileTransform::Flip270 => UV_FLIP270,
        }
    }

    /// Substitution applied when a layer is mirrored horizontally with
    /// transform remapping enabled, so rotated glyphs still read correctly
    /// after the mirror.
    pub fn flipped_horizontal(self) -> TileTransform {
        match self {
            TileTransform::Normal => TileTransform::FlipX,
            TileTransform::FlipX => TileTransform::Normal,
            TileTransform::FlipY => TileTransform::Rotate180,
            TileTransform::Rotate180 => TileTransform::FlipY,
            TileTransform::Rotate90 => TileTransform::Flip90,
            TileTransform::Flip90 => TileTransform::Rotate90,
            TileTransform::Rotate270 => TileTransform::Flip270,
            TileTransform::Flip270 => TileTransform::Rotate270,
        }
    }

    /// Substitution applied when a layer is mirrored vertically with
    /// transform remapping enabled.
    ///
    /// For the 90/270-degree states this matches [`flipped_horizontal`]:
    /// a quarter-turned glyph mirrors to the same composite state either way,
    /// which keeps the two flips commuting per tile.
    ///
    /// [`flipped_horizontal`]: TileTransform::flipped_horizontal
    pub fn flipped_vertical(self) -> TileTransform {
        match self {
            TileTransform::Normal => TileTransform::FlipY,
            TileTransform::FlipY => TileTransform::Normal,
            TileTransform::FlipX => TileTransform::Rotate180,
            TileTransform::Rotate180 => TileTransform::FlipX,
            TileTransform::Rotate90 => TileTransform::Flip90,
            TileTransform::Flip90 => TileTransform::Rotate90,
            TileTransform::Rotate270 => TileTransform::Flip270,
            TileTransform::Flip270 => TileTransform::Rotate270,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip_as_integer() {
        for (i, t) in ALL_TRANSFORMS.iter().enumerate() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, i.to_string());
            let back: TileTransform = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *t);
        }
    }

    #[test]
    fn test_invalid_index_rejected() {
        let result: Result<TileTransform, _> = serde_json::from_str("8");
        assert!(result.is_err());
    }

    #[test]
    fn test_flips_are_involutions() {
        for t in ALL_TRANSFORMS {
            assert_eq!(t.flipped_horizontal().flipped_horizontal(), t);
            assert_eq!(t.flipped_vertical().flipped_vertical(), t);
        }
    }

    #[test]
    fn test_flips_commute() {
        for t in ALL_TRANSFORMS {
            assert_eq!(
                t.flipped_horizontal().flipped_vertical(),
                t.flipped_vertical().flipped_horizontal()
            );
        }
    }

    #[test]
    fn test_rotate90_flip_sequence() {
        // A quarter-turned glyph mirrors to Flip90 and mirrors back.
        let t = TileTransform::Rotate90;
        let h = t.flipped_horizontal();
        assert_eq!(h, TileTransform::Flip90);
        assert_eq!(h.flipped_vertical(), TileTransform::Rotate90);
    }

    #[test]
    fn test_uv_orders_are_distinct() {
        for a in ALL_TRANSFORMS {
            for b in ALL_TRANSFORMS {
                if a != b {
                    assert_ne!(a.uv_order(), b.uv_order(), "{:?} vs {:?}", a, b);
                }
            }
        }
    }
}
