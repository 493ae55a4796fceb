//! Structural operations: resize and frame/layer lifecycle.
//!
//! Each operation here changes array shapes, so each one sets the geometry
//! flag, marks every affected frame fully changed, keeps the frame-delay list
//! and ledger in lockstep with the tile arrays, and commits a whole-document
//! snapshot command. Parameters are validated by direct callers (dialogs,
//! CLI); passing inconsistent values here is a programming error.

use tracing::debug;

use super::{Document, EditContext, LayerMeta, DEFAULT_LAYER_Z_STEP};

impl Document {
    /// Resize to `new_width x new_height`, composing a crop (for any
    /// shrinking axis, anchored at `(origin_x, origin_y)`) and an expand
    /// (for any growing axis, keeping old content at the top-left).
    ///
    /// Grown tiles are blank characters with the context's foreground; their
    /// background is transparent unless `fill_background` asks for the
    /// context's background.
    pub fn resize(
        &mut self,
        new_width: usize,
        new_height: usize,
        origin_x: usize,
        origin_y: usize,
        fill_background: bool,
        ctx: EditContext,
    ) {
        self.clear_preview();
        let before = self.snapshot();
        let (w, h) = (self.width(), self.height());
        debug!(
            from_w = w, from_h = h, to_w = new_width, to_h = new_height,
            "resizing document"
        );
        if new_width < w || new_height < h {
            self.grids.crop(new_width.min(w), new_height.min(h), origin_x, origin_y);
            self.ledger.geometry_changed = true;
            self.ledger.mark_all_frames();
        }
        if new_width > self.width() || new_height > self.height() {
            let fill_bg = if fill_background { ctx.bg } else { 0 };
            self.grids.expand(new_width, new_height, ctx.fg, fill_bg);
            self.ledger.geometry_changed = true;
            self.ledger.mark_all_frames();
        }
        self.clamp_active();
        self.commit_snapshot(before);
    }

    // ----- layers ---------------------------------------------------------

    /// Append a new blank layer and make it active.
    ///
    /// The last layer's data is duplicated as a starting point (cheaper than
    /// allocating fresh arrays) and then cleared.
    pub fn add_layer(&mut self, z: Option<f32>, name: Option<String>) {
        self.clear_preview();
        let before = self.snapshot();
        let last = self.layer_count() - 1;
        self.grids.append_layer_copy(last);
        self.grids.clear_layer(last + 1);
        let z = z.unwrap_or(self.layers[last].z + DEFAULT_LAYER_Z_STEP);
        let name = name.unwrap_or_else(|| format!("Layer {}", self.layer_count()));
        self.layers.push(LayerMeta { z, visible: true, name });
        self.active_layer = self.layer_count() - 1;
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    /// Append a copy of one layer's data across every frame simultaneously,
    /// so the duplicate stays frame-consistent.
    pub fn duplicate_layer(&mut self, src: usize, z: Option<f32>, name: Option<String>) {
        self.clear_preview();
        let before = self.snapshot();
        self.grids.append_layer_copy(src);
        let z = z.unwrap_or(self.layers[self.layers.len() - 1].z + DEFAULT_LAYER_Z_STEP);
        let name = name.unwrap_or_else(|| format!("{} copy", self.layers[src].name));
        self.layers.push(LayerMeta { z, visible: self.layers[src].visible, name });
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    /// Remove one layer's slice from every frame. If the active layer index
    /// falls out of range it clamps to the new last layer.
    pub fn delete_layer(&mut self, index: usize) {
        self.clear_preview();
        let before = self.snapshot();
        self.grids.remove_layer(index);
        self.layers.remove(index);
        self.clamp_active();
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    // ----- frames ---------------------------------------------------------

    /// Insert a blank frame at `index`, shifting subsequent frames. Layer 0's
    /// background is pre-filled with `bg_fill` when given; everything else is
    /// blank.
    pub fn insert_frame_before(&mut self, index: usize, delay: f32, bg_fill: Option<u32>) {
        self.clear_preview();
        let before = self.snapshot();
        self.grids.insert_blank_frame(index, bg_fill);
        self.frame_delays.insert(index, delay);
        self.ledger.insert_frame(index, crate::ledger::ChannelSet::ALL);
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    /// Deep-copy frame `src`'s full layer stack to `dest` (default: right
    /// after `src`), with its own delay (default: the source frame's).
    pub fn duplicate_frame(&mut self, src: usize, dest: Option<usize>, delay: Option<f32>) {
        self.clear_preview();
        let before = self.snapshot();
        let dest = dest.unwrap_or(src + 1);
        let delay = delay.unwrap_or(self.frame_delays[src]);
        self.grids.duplicate_frame(src, dest);
        self.frame_delays.insert(dest, delay);
        self.ledger.insert_frame(dest, crate::ledger::ChannelSet::ALL);
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    /// Remove one frame's full layer stack and its delay.
    pub fn delete_frame_at(&mut self, index: usize) {
        self.clear_preview();
        let before = self.snapshot();
        self.grids.remove_frame(index);
        self.frame_delays.remove(index);
        self.ledger.remove_frame(index);
        self.clamp_active();
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }

    /// Relocate a frame without copying its payload (pop-then-insert). The
    /// delay list moves in lockstep.
    pub fn move_frame_to(&mut self, src: usize, dest: usize) {
        self.clear_preview();
        let before = self.snapshot();
        self.grids.move_frame(src, dest);
        let delay = self.frame_delays.remove(src);
        self.frame_delays.insert(dest, delay);
        self.ledger.move_frame(src, dest);
        self.ledger.mark_all_frames();
        self.commit_snapshot(before);
    }
}
