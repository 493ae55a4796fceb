//! Document save/load through the serialized schema in [`crate::models`].
//!
//! Loading is all-or-nothing: a malformed file, a shape mismatch, or an
//! unresolvable charset/palette name produces a [`LoadError`] and no
//! document. Save and load are synchronous whole-file operations; documents
//! are small (tens of thousands of tiles at most).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LoadError, SaveError};
use crate::grid::Tile;
use crate::models::{ArtFile, FrameRecord, LayerRecord, TileRecord};
use crate::registry::{CharsetRegistry, PaletteRegistry};

use super::{Document, EditContext, LayerMeta};

impl Document {
    /// Serialize to the file schema, row-major per layer.
    pub fn to_file(&self) -> ArtFile {
        let frames = (0..self.frame_count())
            .map(|frame| FrameRecord {
                delay: self.frame_delays[frame],
                layers: (0..self.layer_count())
                    .map(|layer| {
                        let meta = &self.layers[layer];
                        let mut tiles = Vec::with_capacity(self.width() * self.height());
                        for y in 0..self.height() {
                            for x in 0..self.width() {
                                let t = self.get_tile(frame, layer, x, y);
                                tiles.push(TileRecord {
                                    ch: t.ch,
                                    fg: t.fg,
                                    bg: t.bg,
                                    xform: t.xform,
                                });
                            }
                        }
                        LayerRecord {
                            z: meta.z,
                            visible: meta.visible as u8,
                            name: meta.name.clone(),
                            tiles,
                        }
                    })
                    .collect(),
            })
            .collect();
        ArtFile {
            width: self.width(),
            height: self.height(),
            charset: self.charset.name.clone(),
            palette: self.palette.name.clone(),
            active_frame: self.active_frame,
            active_layer: self.active_layer,
            camera: self.camera,
            selected_char: self.selected.ch,
            selected_fg: self.selected.fg,
            selected_bg: self.selected.bg,
            selected_xform: self.selected.xform,
            frames,
        }
    }

    /// Build a document from a parsed file record, resolving the charset and
    /// palette names through the given registries.
    pub fn from_file(
        file: &ArtFile,
        charsets: &CharsetRegistry,
        palettes: &PaletteRegistry,
    ) -> Result<Document, LoadError> {
        if file.width == 0 || file.height == 0 {
            return Err(LoadError::EmptyDimensions { width: file.width, height: file.height });
        }
        if file.frames.is_empty() {
            return Err(LoadError::NoFrames);
        }
        let layer_count = file.frames[0].layers.len();
        if layer_count == 0 {
            return Err(LoadError::LayerCountMismatch { frame: 0, got: 0, expected: 1 });
        }
        let cell_count = file.width * file.height;
        for (f, frame) in file.frames.iter().enumerate() {
            if frame.layers.len() != layer_count {
                return Err(LoadError::LayerCountMismatch {
                    frame: f,
                    got: frame.layers.len(),
                    expected: layer_count,
                });
            }
            for (l, layer) in frame.layers.iter().enumerate() {
                if layer.tiles.len() != cell_count {
                    return Err(LoadError::TileCountMismatch {
                        frame: f,
                        layer: l,
                        got: layer.tiles.len(),
                        expected: cell_count,
                    });
                }
            }
        }
        let charset = charsets
            .get_rc(&file.charset)
            .ok_or_else(|| LoadError::CharsetNotFound(file.charset.clone()))?;
        let palette = palettes
            .get_rc(&file.palette)
            .ok_or_else(|| LoadError::PaletteNotFound(file.palette.clone()))?;

        let mut doc = Document::with_shape(
            charset,
            palette,
            file.width,
            file.height,
            file.frames.len(),
            layer_count,
        );
        for (f, frame) in file.frames.iter().enumerate() {
            doc.frame_delays[f] = frame.delay;
            for (l, layer) in frame.layers.iter().enumerate() {
                for (i, t) in layer.tiles.iter().enumerate() {
                    let (x, y) = (i % file.width, i / file.width);
                    doc.grids.set(f, l, x, y, Tile::new(t.ch, t.fg, t.bg, t.xform));
                }
            }
        }
        doc.layers = file.frames[0]
            .layers
            .iter()
            .map(|l| LayerMeta { z: l.z, visible: l.visible != 0, name: l.name.clone() })
            .collect();
        doc.active_frame = file.active_frame;
        doc.active_layer = file.active_layer;
        doc.clamp_active();
        doc.camera = file.camera;
        doc.selected = EditContext {
            ch: file.selected_char,
            fg: file.selected_fg,
            bg: file.selected_bg,
            xform: file.selected_xform,
        };
        Ok(doc)
    }

    /// Write this document to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(&self.to_file())?;
        fs::write(path, json)?;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }

    /// Read and validate a document from `path`.
    pub fn load(
        path: &Path,
        charsets: &CharsetRegistry,
        palettes: &PaletteRegistry,
    ) -> Result<Document, LoadError> {
        let json = fs::read_to_string(path)?;
        let file: ArtFile = serde_json::from_str(&json)?;
        let doc = Self::from_file(&file, charsets, palettes)?;
        debug!(
            path = %path.display(),
            frames = doc.frame_count(),
            layers = doc.layer_count(),
            "loaded document"
        );
        Ok(doc)
    }
}
