//! Tile quad geometry: one quad per tile per layer.
//!
//! Geometry depends only on the document's dimensions, layer depths, and the
//! charset's glyph aspect -- never on tile contents -- so it is rebuilt only
//! when the geometry flag was set by a structural change, while the per-tile
//! channel buffers refresh far more often.

use crate::doc::LayerMeta;

/// Vertex and element buffers for every tile quad of a document.
///
/// Corners are emitted top-left, top-right, bottom-left, bottom-right, the
/// same order as [`crate::transform::TileTransform::uv_order`] UVs; elements
/// index two triangles per quad.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometry {
    /// `[x, y, z]` per corner, four corners per quad. `x` grows right, `y`
    /// grows down, `z` is the tile's layer depth.
    pub vertices: Vec<[f32; 3]>,
    pub elements: Vec<u32>,
}

impl TileGeometry {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Build the quad geometry for a `width x height` document. Quads are one
/// tile wide and `quad_aspect` tall, matching the charset's glyph cell.
pub fn build_geometry(
    width: usize,
    height: usize,
    layers: &[LayerMeta],
    quad_aspect: f32,
) -> TileGeometry {
    let quads = layers.len() * height * width;
    let mut vertices = Vec::with_capacity(quads * 4);
    let mut elements = Vec::with_capacity(quads * 6);
    for layer in layers {
        for y in 0..height {
            for x in 0..width {
                let left = x as f32;
                let right = left + 1.0;
                let top = y as f32 * quad_aspect;
                let bottom = top + quad_aspect;
                let base = vertices.len() as u32;
                vertices.push([left, top, layer.z]);
                vertices.push([right, top, layer.z]);
                vertices.push([left, bottom, layer.z]);
                vertices.push([right, bottom, layer.z]);
                elements.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
            }
        }
    }
    TileGeometry { vertices, elements }
}
