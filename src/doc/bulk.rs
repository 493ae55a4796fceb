//! Derived bulk operations: mirroring, shifting, compositing, color remaps.

use crate::grid::Tile;
use crate::ledger::ChannelSet;
use crate::undo::{EditCommand, TileDelta};

use super::{Document, EditContext};

impl Document {
    /// Mirror one layer of one frame across the vertical axis, as a single
    /// undoable command covering the whole layer.
    ///
    /// With `flips_remap_transforms` set, each tile's transform is also
    /// substituted so rotated glyphs still read correctly after the mirror --
    /// a glyph-rendering correctness requirement, not cosmetics.
    pub fn flip_horizontal(&mut self, frame: usize, layer: usize) {
        self.clear_preview();
        let before = self.layer_tiles(frame, layer);
        self.grids.flip_layer_horizontal(frame, layer);
        if self.flips_remap_transforms {
            self.remap_layer_transforms(frame, layer, true);
        }
        self.ledger.mark(frame, ChannelSet::ALL);
        self.commit_layer_deltas(frame, layer, before);
    }

    /// Mirror one layer of one frame across the horizontal axis; see
    /// [`Document::flip_horizontal`].
    pub fn flip_vertical(&mut self, frame: usize, layer: usize) {
        self.clear_preview();
        let before = self.layer_tiles(frame, layer);
        self.grids.flip_layer_vertical(frame, layer);
        if self.flips_remap_transforms {
            self.remap_layer_transforms(frame, layer, false);
        }
        self.ledger.mark(frame, ChannelSet::ALL);
        self.commit_layer_deltas(frame, layer, before);
    }

    fn remap_layer_transforms(&mut self, frame: usize, layer: usize, horizontal: bool) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let xform = self.grids.get(frame, layer, x, y).xform;
                let remapped = if horizontal {
                    xform.flipped_horizontal()
                } else {
                    xform.flipped_vertical()
                };
                self.grids.set_xform(frame, layer, x, y, remapped);
            }
        }
    }

    /// Wrapping (toroidal) translation of one layer of one frame, as a
    /// single undoable command.
    pub fn shift(&mut self, frame: usize, layer: usize, dx: i32, dy: i32) {
        self.clear_preview();
        let before = self.layer_tiles(frame, layer);
        self.grids.shift_layer(frame, layer, dx, dy);
        self.ledger.mark(frame, ChannelSet::ALL);
        self.commit_layer_deltas(frame, layer, before);
    }

    /// Apply [`Document::shift`] to every layer of every frame, as one
    /// whole-document command.
    pub fn shift_all_frames(&mut self, dx: i32, dy: i32) {
        self.clear_preview();
        let before = self.snapshot();
        for frame in 0..self.frame_count() {
            for layer in 0..self.layer_count() {
                self.grids.shift_layer(frame, layer, dx, dy);
            }
            self.ledger.mark(frame, ChannelSet::ALL);
        }
        self.commit_snapshot(before);
    }

    /// Copy a rectangular tile region into another document, transparency-
    /// aware: source tiles with a blank character or transparent foreground
    /// are skipped entirely, and a transparent source background preserves
    /// the destination's existing background instead of overwriting it.
    pub fn composite_to(
        &self,
        src_frame: usize,
        src_layer: usize,
        src_x: usize,
        src_y: usize,
        rect_w: usize,
        rect_h: usize,
        dest: &mut Document,
        dest_frame: usize,
        dest_layer: usize,
        dest_x: usize,
        dest_y: usize,
    ) {
        for dy in 0..rect_h {
            for dx in 0..rect_w {
                let (sx, sy) = (src_x + dx, src_y + dy);
                if !self.is_tile_inside(sx, sy) {
                    continue;
                }
                let (tx, ty) = (dest_x + dx, dest_y + dy);
                if !dest.is_tile_inside(tx, ty) {
                    continue;
                }
                let src = self.get_tile(src_frame, src_layer, sx, sy);
                if src.ch == 0 || src.fg == 0 {
                    continue;
                }
                let bg = if src.bg == 0 { None } else { Some(src.bg) };
                dest.set_tile(
                    dest_frame,
                    dest_layer,
                    tx,
                    ty,
                    Some(src.ch),
                    Some(src.fg),
                    bg,
                    Some(src.xform),
                );
            }
        }
    }

    /// Same-document form of [`Document::composite_to`]: copy a region from
    /// one frame/layer onto another with the same transparency rules.
    pub fn composite_within(
        &mut self,
        src_frame: usize,
        src_layer: usize,
        src_x: usize,
        src_y: usize,
        rect_w: usize,
        rect_h: usize,
        dest_frame: usize,
        dest_layer: usize,
        dest_x: usize,
        dest_y: usize,
    ) {
        self.clear_preview();
        for dy in 0..rect_h {
            for dx in 0..rect_w {
                let (sx, sy) = (src_x + dx, src_y + dy);
                let (tx, ty) = (dest_x + dx, dest_y + dy);
                if !self.is_tile_inside(sx, sy) || !self.is_tile_inside(tx, ty) {
                    continue;
                }
                let src = self.get_tile(src_frame, src_layer, sx, sy);
                if src.ch == 0 || src.fg == 0 {
                    continue;
                }
                let bg = if src.bg == 0 { None } else { Some(src.bg) };
                self.set_tile(
                    dest_frame,
                    dest_layer,
                    tx,
                    ty,
                    Some(src.ch),
                    Some(src.fg),
                    bg,
                    Some(src.xform),
                );
            }
        }
    }

    /// Remap every non-transparent foreground and background index in the
    /// whole document to `color`, as one undoable command.
    pub fn set_all_non_transparent_colors(&mut self, color: u32) {
        self.clear_preview();
        let own = self.open_command_guard();
        for coord in self.tile_coords() {
            let tile = self.get_tile(coord.frame, coord.layer, coord.x, coord.y);
            if tile.fg != 0 {
                self.set_fg(coord.frame, coord.layer, coord.x, coord.y, color);
            }
            if tile.bg != 0 {
                self.set_bg(coord.frame, coord.layer, coord.x, coord.y, color);
            }
        }
        self.close_command_guard(own);
    }

    /// Set every background index in the whole document to `color`, skipping
    /// layers whose name appears in `exclude_layers`.
    pub fn set_all_bg_colors(&mut self, color: u32, exclude_layers: &[&str]) {
        self.clear_preview();
        let excluded: Vec<bool> = self
            .layers
            .iter()
            .map(|l| exclude_layers.contains(&l.name.as_str()))
            .collect();
        let own = self.open_command_guard();
        for coord in self.tile_coords() {
            if excluded[coord.layer] {
                continue;
            }
            self.set_bg(coord.frame, coord.layer, coord.x, coord.y, color);
        }
        self.close_command_guard(own);
    }

    /// Write a string of characters along a row through the charset's
    /// character lookup, using the context's colors and transform.
    /// Characters the charset does not map, and tiles past the right edge,
    /// are skipped.
    pub fn write_string(
        &mut self,
        frame: usize,
        layer: usize,
        x: usize,
        y: usize,
        text: &str,
        ctx: EditContext,
    ) {
        self.clear_preview();
        if !self.is_tile_inside(x, y) {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let tx = x + i;
            if !self.is_tile_inside(tx, y) {
                break;
            }
            if let Some(index) = self.charset.index_of(ch) {
                self.set_tile_full(
                    frame,
                    layer,
                    tx,
                    y,
                    Tile::new(index, ctx.fg, ctx.bg, ctx.xform),
                );
            }
        }
    }

    // ----- helpers --------------------------------------------------------

    /// Row-major copy of one layer's tiles, for whole-layer command capture.
    fn layer_tiles(&self, frame: usize, layer: usize) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.width() * self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                tiles.push(self.get_tile(frame, layer, x, y));
            }
        }
        tiles
    }

    /// Commit a command holding the per-tile changes of one layer edit.
    fn commit_layer_deltas(&mut self, frame: usize, layer: usize, before: Vec<Tile>) {
        let mut deltas = Vec::new();
        let width = self.width();
        for y in 0..self.height() {
            for x in 0..width {
                let after = self.get_tile(frame, layer, x, y);
                deltas.push(TileDelta {
                    frame,
                    layer,
                    x,
                    y,
                    before: before[y * width + x],
                    after,
                });
            }
        }
        self.commit_external(EditCommand::Tiles(deltas));
    }

    /// Open a command only when the caller has not already opened one.
    /// Returns whether this call owns the command.
    fn open_command_guard(&mut self) -> bool {
        if self.has_open_command() {
            false
        } else {
            self.begin_command();
            true
        }
    }

    fn close_command_guard(&mut self, own: bool) {
        if own {
            self.commit_command();
        }
    }
}
