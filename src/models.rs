//! Serialized document schema.
//!
//! The on-disk format is a JSON record mirroring these structs. The schema is
//! explicit and typed: only known fields are loaded, each with its declared
//! type, and unknown keys are ignored. Round-trip fidelity (every tile
//! 4-tuple, layer metadata, frame delays) is a hard requirement.

use serde::{Deserialize, Serialize};

use crate::transform::TileTransform;

/// Top-level document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtFile {
    /// Tile dimensions shared by all frames and layers.
    pub width: usize,
    pub height: usize,
    /// Charset name, resolved through the charset registry on load.
    pub charset: String,
    /// Palette name, resolved through the palette registry on load.
    pub palette: String,
    #[serde(default)]
    pub active_frame: usize,
    #[serde(default)]
    pub active_layer: usize,
    /// Editor camera position, round-tripped for session restore.
    #[serde(default)]
    pub camera: [f32; 3],
    /// Scratch selections restored into the edit context on load.
    #[serde(default)]
    pub selected_char: u32,
    #[serde(default)]
    pub selected_fg: u32,
    #[serde(default)]
    pub selected_bg: u32,
    #[serde(default)]
    pub selected_xform: TileTransform,
    pub frames: Vec<FrameRecord>,
}

/// One animation frame: its hold time and layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Hold time in seconds.
    pub delay: f32,
    pub layers: Vec<LayerRecord>,
}

fn default_visible() -> u8 {
    1
}

/// One layer of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Z depth of the layer's quads.
    pub z: f32,
    /// Boolean-as-integer for file compatibility: 0 hidden, anything else
    /// visible.
    #[serde(default = "default_visible")]
    pub visible: u8,
    #[serde(default)]
    pub name: String,
    /// Flat row-major tile list (`y` outer, `x` inner) covering the full
    /// `width * height` grid.
    pub tiles: Vec<TileRecord>,
}

/// One tile's serialized 4-tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    #[serde(rename = "char")]
    pub ch: u32,
    pub fg: u32,
    pub bg: u32,
    /// Absent in files written before transforms existed; defaults upright.
    #[serde(default)]
    pub xform: TileTransform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_record_xform_defaults_to_normal() {
        let tile: TileRecord = serde_json::from_str(r#"{"char": 3, "fg": 1, "bg": 2}"#).unwrap();
        assert_eq!(tile.xform, TileTransform::Normal);
        assert_eq!(tile.ch, 3);
    }

    #[test]
    fn test_layer_record_visible_defaults_on() {
        let layer: LayerRecord =
            serde_json::from_str(r#"{"z": 0.0, "tiles": []}"#).unwrap();
        assert_eq!(layer.visible, 1);
        assert_eq!(layer.name, "");
    }

    #[test]
    fn test_art_file_roundtrip() {
        let file = ArtFile {
            width: 1,
            height: 1,
            charset: "ascii".to_string(),
            palette: "c16".to_string(),
            active_frame: 0,
            active_layer: 0,
            camera: [0.5, -1.0, 2.0],
            selected_char: 7,
            selected_fg: 2,
            selected_bg: 3,
            selected_xform: TileTransform::FlipY,
            frames: vec![FrameRecord {
                delay: 0.1,
                layers: vec![LayerRecord {
                    z: 0.0,
                    visible: 1,
                    name: "base".to_string(),
                    tiles: vec![TileRecord {
                        ch: 9,
                        fg: 4,
                        bg: 0,
                        xform: TileTransform::Rotate270,
                    }],
                }],
            }],
        };
        let json = serde_json::to_string(&file).unwrap();
        let back: ArtFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, file);
    }
}
