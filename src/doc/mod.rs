//! The `Document`: one editable tile-grid artwork.
//!
//! A document owns the four channel grids, the change ledger, and its command
//! stack, and is the only writer of tile state. Every mutation entry point
//! marks the ledger in the same call, records an undo delta when a command is
//! open, and reverts any speculative preview first, so editors, scripts, and
//! a live cursor preview can coexist without corrupting persisted state.
//!
//! All document mutation, change tracking, and renderer sync happen on one
//! logical thread inside one [`Document::update`] call per application frame.

pub mod bulk;
pub mod file;
pub mod instance;
pub mod iter;
pub mod structure;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::charset::Charset;
use crate::geometry::build_geometry;
use crate::grid::{Tile, TileGrids};
use crate::ledger::{ChangeLedger, ChannelSet};
use crate::palette::Palette;
use crate::render::DocRenderer;
use crate::script::{DocScript, ScheduledScript};
use crate::transform::TileTransform;
use crate::undo::{CommandStack, DocSnapshot, EditCommand, TileDelta};

pub use instance::DocInstance;
pub use iter::{TileCoord, TileIter};

/// Hold time given to frames created without an explicit delay.
pub const DEFAULT_FRAME_DELAY: f32 = 0.1;

/// Z step between layers created without an explicit depth.
pub const DEFAULT_LAYER_Z_STEP: f32 = 0.1;

/// Per-layer metadata: quad depth, visibility, display name.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerMeta {
    pub z: f32,
    pub visible: bool,
    pub name: String,
}

/// Currently-selected character/color/transform defaults, passed explicitly
/// into the operations that create new tiles (frame insertion, expand fill)
/// instead of being read from application-global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditContext {
    pub ch: u32,
    pub fg: u32,
    pub bg: u32,
    pub xform: TileTransform,
}

impl Default for EditContext {
    fn default() -> Self {
        // First non-transparent color as the working foreground.
        Self { ch: 0, fg: 1, bg: 0, xform: TileTransform::Normal }
    }
}

/// One editable tile-grid artwork with its frames, layers, and undo history.
pub struct Document {
    pub(crate) grids: TileGrids,
    pub active_frame: usize,
    pub active_layer: usize,
    pub charset: Rc<Charset>,
    pub palette: Rc<Palette>,
    /// One entry per layer, shared by every frame.
    pub layers: Vec<LayerMeta>,
    /// Hold time in seconds per frame; always the same length as the frame
    /// count, in matching order.
    pub frame_delays: Vec<f32>,
    /// Editor camera position, round-tripped through the file format.
    pub camera: [f32; 3],
    /// Scratch selections, round-tripped through the file format.
    pub selected: EditContext,
    /// When set, layer mirroring also remaps tile transforms so rotated
    /// glyphs still read correctly after the mirror.
    pub flips_remap_transforms: bool,
    pub(crate) ledger: ChangeLedger,
    stack: CommandStack,
    open_deltas: Option<Vec<TileDelta>>,
    preview_deltas: Vec<TileDelta>,
    renderers: Vec<Weak<RefCell<dyn DocRenderer>>>,
    instances: Vec<Rc<RefCell<DocInstance>>>,
    scripts: Vec<ScheduledScript>,
    clock: f32,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("active_frame", &self.active_frame)
            .field("active_layer", &self.active_layer)
            .field("layers", &self.layers)
            .field("frame_delays", &self.frame_delays)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// A blank document: one frame, one layer, every tile blank with a
    /// transparent background.
    pub fn new(charset: Rc<Charset>, palette: Rc<Palette>, width: usize, height: usize) -> Self {
        Self::with_shape(charset, palette, width, height, 1, 1)
    }

    /// A blank document with the given frame and layer counts.
    pub fn with_shape(
        charset: Rc<Charset>,
        palette: Rc<Palette>,
        width: usize,
        height: usize,
        frames: usize,
        layers: usize,
    ) -> Self {
        let layer_meta = (0..layers)
            .map(|i| LayerMeta {
                z: i as f32 * DEFAULT_LAYER_Z_STEP,
                visible: true,
                name: format!("Layer {}", i + 1),
            })
            .collect();
        // A new document presents everything as changed, same as a loaded
        // one, so the first update tick binds geometry and fills every
        // buffer of any renderer attached at creation.
        let mut ledger = ChangeLedger::new(frames);
        ledger.mark_all_frames();
        ledger.geometry_changed = true;
        Self {
            grids: TileGrids::new(width, height, frames, layers),
            active_frame: 0,
            active_layer: 0,
            charset,
            palette,
            layers: layer_meta,
            frame_delays: vec![DEFAULT_FRAME_DELAY; frames],
            camera: [0.0, 0.0, 1.0],
            selected: EditContext::default(),
            flips_remap_transforms: true,
            ledger,
            stack: CommandStack::new(),
            open_deltas: None,
            preview_deltas: Vec::new(),
            renderers: Vec::new(),
            instances: Vec::new(),
            scripts: Vec::new(),
            clock: 0.0,
        }
    }

    pub fn width(&self) -> usize {
        self.grids.width()
    }

    pub fn height(&self) -> usize {
        self.grids.height()
    }

    pub fn frame_count(&self) -> usize {
        self.grids.frames()
    }

    pub fn layer_count(&self) -> usize {
        self.grids.layers()
    }

    /// Height-over-width ratio of one tile quad, from the charset's glyph
    /// cell aspect.
    pub fn quad_aspect(&self) -> f32 {
        self.charset.quad_aspect()
    }

    pub fn is_tile_inside(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    // ----- tile read/write ------------------------------------------------

    /// Read one tile's full 4-tuple. Coordinates must be pre-validated with
    /// [`Document::is_tile_inside`]; out of bounds is a caller error.
    #[inline]
    pub fn get_tile(&self, frame: usize, layer: usize, x: usize, y: usize) -> Tile {
        self.grids.get(frame, layer, x, y)
    }

    pub fn set_char_index(&mut self, frame: usize, layer: usize, x: usize, y: usize, ch: u32) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        self.grids.set_char(frame, layer, x, y, ch);
        self.ledger.mark(frame, ChannelSet::CHAR);
        self.record(frame, layer, x, y, before);
    }

    /// Set the foreground color index. Positive out-of-range values wrap
    /// modulo the palette size; 0 stays the transparent index.
    ///
    /// Both color setters mark both color flags. That is broader than
    /// strictly necessary, and existing callers rely on the broader
    /// invalidation, so it stays.
    pub fn set_fg(&mut self, frame: usize, layer: usize, x: usize, y: usize, fg: u32) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        self.grids.set_fg(frame, layer, x, y, self.palette.normalize(fg));
        self.ledger.mark(frame, ChannelSet::COLORS);
        self.record(frame, layer, x, y, before);
    }

    /// Set the background color index, with the same normalization and
    /// ledger behavior as [`Document::set_fg`].
    pub fn set_bg(&mut self, frame: usize, layer: usize, x: usize, y: usize, bg: u32) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        self.grids.set_bg(frame, layer, x, y, self.palette.normalize(bg));
        self.ledger.mark(frame, ChannelSet::COLORS);
        self.record(frame, layer, x, y, before);
    }

    pub fn set_transform(
        &mut self,
        frame: usize,
        layer: usize,
        x: usize,
        y: usize,
        xform: TileTransform,
    ) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        self.grids.set_xform(frame, layer, x, y, xform);
        self.ledger.mark(frame, ChannelSet::XFORM);
        self.record(frame, layer, x, y, before);
    }

    /// Write only the provided channels of one tile.
    pub fn set_tile(
        &mut self,
        frame: usize,
        layer: usize,
        x: usize,
        y: usize,
        ch: Option<u32>,
        fg: Option<u32>,
        bg: Option<u32>,
        xform: Option<TileTransform>,
    ) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        let mut marked = ChannelSet::NONE;
        if let Some(ch) = ch {
            self.grids.set_char(frame, layer, x, y, ch);
            marked = marked.union(ChannelSet::CHAR);
        }
        if let Some(fg) = fg {
            self.grids.set_fg(frame, layer, x, y, self.palette.normalize(fg));
            marked = marked.union(ChannelSet::COLORS);
        }
        if let Some(bg) = bg {
            self.grids.set_bg(frame, layer, x, y, self.palette.normalize(bg));
            marked = marked.union(ChannelSet::COLORS);
        }
        if let Some(xform) = xform {
            self.grids.set_xform(frame, layer, x, y, xform);
            marked = marked.union(ChannelSet::XFORM);
        }
        if marked.any() {
            self.ledger.mark(frame, marked);
            self.record(frame, layer, x, y, before);
        }
    }

    /// Write all four channels of one tile. Fast path for undo/redo and
    /// scripted bulk edits that always know the full 4-tuple; colors are
    /// still normalized.
    pub fn set_tile_full(&mut self, frame: usize, layer: usize, x: usize, y: usize, tile: Tile) {
        self.clear_preview();
        let before = self.grids.get(frame, layer, x, y);
        let tile = Tile {
            fg: self.palette.normalize(tile.fg),
            bg: self.palette.normalize(tile.bg),
            ..tile
        };
        self.grids.set(frame, layer, x, y, tile);
        self.ledger.mark(frame, ChannelSet::ALL);
        self.record(frame, layer, x, y, before);
    }

    /// Write a tile without recording an undo delta. Used by undo/redo
    /// application and preview reverts; still marks the ledger.
    fn write_tile(&mut self, frame: usize, layer: usize, x: usize, y: usize, tile: Tile) {
        self.grids.set(frame, layer, x, y, tile);
        self.ledger.mark(frame, ChannelSet::ALL);
    }

    #[inline]
    fn record(&mut self, frame: usize, layer: usize, x: usize, y: usize, before: Tile) {
        if let Some(deltas) = &mut self.open_deltas {
            let after = self.grids.get(frame, layer, x, y);
            deltas.push(TileDelta { frame, layer, x, y, before, after });
        }
    }

    // ----- commands, undo, redo -------------------------------------------

    /// Open a command accumulating tile deltas for one logical user action.
    pub fn begin_command(&mut self) {
        self.clear_preview();
        debug_assert!(self.open_deltas.is_none(), "command already open");
        self.open_deltas = Some(Vec::new());
    }

    /// Commit the open command to the undo list. No-op deltas are elided; a
    /// command with nothing left is dropped.
    pub fn commit_command(&mut self) {
        if let Some(deltas) = self.open_deltas.take() {
            self.stack.commit(EditCommand::Tiles(deltas));
        }
    }

    pub fn has_open_command(&self) -> bool {
        self.open_deltas.is_some()
    }

    /// Commit a command assembled outside the open-delta path (whole-layer
    /// bulk edits build their deltas directly).
    pub(crate) fn commit_external(&mut self, command: EditCommand) {
        self.stack.commit(command);
    }

    pub(crate) fn snapshot(&self) -> DocSnapshot {
        DocSnapshot {
            grids: self.grids.clone(),
            layers: self.layers.clone(),
            frame_delays: self.frame_delays.clone(),
        }
    }

    /// Commit a whole-document command from a snapshot taken before the edit.
    /// The after-snapshot is taken here, whatever state the edit left behind.
    pub(crate) fn commit_snapshot(&mut self, before: DocSnapshot) {
        let after = self.snapshot();
        self.stack.commit(EditCommand::Snapshot {
            before: Box::new(before),
            after: Box::new(after),
        });
    }

    /// Undo the most recent committed command, if any.
    pub fn undo(&mut self) {
        self.clear_preview();
        if let Some(command) = self.stack.pop_undo() {
            self.apply_command(&command, true);
            self.stack.push_redo(command);
        }
    }

    /// Reapply the most recently undone command, if any.
    pub fn redo(&mut self) {
        self.clear_preview();
        if let Some(command) = self.stack.pop_redo() {
            self.apply_command(&command, false);
            self.stack.push_undo(command);
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.stack.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.stack.redo_depth()
    }

    fn apply_command(&mut self, command: &EditCommand, reverse: bool) {
        match command {
            EditCommand::Tiles(deltas) => {
                // Reverse-apply walks the deltas backwards so repeated edits
                // to one tile unwind correctly.
                if reverse {
                    for d in deltas.iter().rev() {
                        self.write_tile(d.frame, d.layer, d.x, d.y, d.before);
                    }
                } else {
                    for d in deltas {
                        self.write_tile(d.frame, d.layer, d.x, d.y, d.after);
                    }
                }
            }
            EditCommand::Snapshot { before, after } => {
                let snap = if reverse { before } else { after };
                self.restore_snapshot(snap);
            }
        }
    }

    fn restore_snapshot(&mut self, snap: &DocSnapshot) {
        self.grids = snap.grids.clone();
        self.layers = snap.layers.clone();
        self.frame_delays = snap.frame_delays.clone();
        self.ledger = ChangeLedger::new(self.grids.frames());
        self.ledger.geometry_changed = true;
        self.ledger.mark_all_frames();
        self.clamp_active();
    }

    pub(crate) fn clamp_active(&mut self) {
        self.active_frame = self.active_frame.min(self.frame_count().saturating_sub(1));
        self.active_layer = self.active_layer.min(self.layer_count().saturating_sub(1));
    }

    // ----- preview --------------------------------------------------------

    /// Speculatively write one tile as a cursor preview. Preview writes are
    /// not recorded in the undo history and are unconditionally reverted
    /// before any other mutation proceeds.
    pub fn preview_tile(&mut self, frame: usize, layer: usize, x: usize, y: usize, tile: Tile) {
        let before = self.grids.get(frame, layer, x, y);
        self.grids.set(frame, layer, x, y, tile);
        let after = self.grids.get(frame, layer, x, y);
        self.ledger.mark(frame, ChannelSet::ALL);
        self.preview_deltas.push(TileDelta { frame, layer, x, y, before, after });
    }

    /// Revert any active preview, restoring every previewed tile.
    pub fn clear_preview(&mut self) {
        if self.preview_deltas.is_empty() {
            return;
        }
        let deltas = std::mem::take(&mut self.preview_deltas);
        for d in deltas.iter().rev() {
            self.grids.set(d.frame, d.layer, d.x, d.y, d.before);
            self.ledger.mark(d.frame, ChannelSet::ALL);
        }
    }

    pub fn has_preview(&self) -> bool {
        !self.preview_deltas.is_empty()
    }

    // ----- renderers, instances, scripts ----------------------------------

    /// Register a renderer's interest in this document. The document keeps a
    /// weak reference only; dead renderers are pruned during update.
    pub fn attach_renderer(&mut self, renderer: &Rc<RefCell<dyn DocRenderer>>) {
        self.renderers.push(Rc::downgrade(renderer));
    }

    /// Create a live deep-copy instance of this document.
    pub fn create_instance(&mut self, auto_refresh: bool) -> Rc<RefCell<DocInstance>> {
        let instance = Rc::new(RefCell::new(DocInstance::new(
            &self.grids,
            &self.frame_delays,
            Rc::clone(&self.charset),
            Rc::clone(&self.palette),
            auto_refresh,
        )));
        self.instances.push(Rc::clone(&instance));
        instance
    }

    /// Restore one instance from this document's current state, regardless
    /// of its auto-refresh setting. The only synchronization direction is
    /// source to instance.
    pub fn restore_instance(&self, instance: &mut DocInstance) {
        instance.restore_from(&self.grids, &self.frame_delays);
    }

    /// Schedule a script to run during update every `interval` seconds. An
    /// interval of zero runs it every tick.
    pub fn add_script(&mut self, script: Box<dyn DocScript>, interval: f32) {
        self.scripts.push(ScheduledScript::new(script, interval));
    }

    // ----- per-tick update ------------------------------------------------

    /// Reconcile document state with attached renderers and instances.
    /// Called exactly once per application frame.
    ///
    /// Order matters: scripts run first and may mutate; geometry is rebound
    /// before channel refreshes; the ledger is cleared only at the end, for
    /// every frame, whether or not a renderer displayed it.
    pub fn update(&mut self, dt: f32) {
        self.clear_preview();
        self.clock += dt;
        self.run_due_scripts();

        let any_changed = self.ledger.any_changed() || self.ledger.geometry_changed;

        self.renderers.retain(|r| r.strong_count() > 0);

        if self.ledger.geometry_changed {
            let geometry = build_geometry(
                self.grids.width(),
                self.grids.height(),
                &self.layers,
                self.quad_aspect(),
            );
            for renderer in &self.renderers {
                if let Some(r) = renderer.upgrade() {
                    r.borrow_mut().rebind_geometry(&geometry);
                }
            }
            self.ledger.geometry_changed = false;
        }

        for renderer in &self.renderers {
            if let Some(r) = renderer.upgrade() {
                let mut r = r.borrow_mut();
                let frame = r.frame();
                let changed = self.ledger.frame_changes(frame);
                if changed.any() {
                    r.refresh_channels(frame, changed);
                }
            }
        }

        if any_changed {
            let grids = &self.grids;
            let delays = &self.frame_delays;
            for instance in &self.instances {
                let mut inst = instance.borrow_mut();
                if inst.auto_refresh {
                    inst.restore_from(grids, delays);
                }
            }
        }

        self.ledger.clear_frames();
    }

    fn run_due_scripts(&mut self) {
        if self.scripts.is_empty() {
            return;
        }
        let mut scripts = std::mem::take(&mut self.scripts);
        for entry in &mut scripts {
            if self.clock < entry.next_run {
                continue;
            }
            entry.next_run = self.clock + entry.interval;
            let ctx = self.selected;
            let before = self.snapshot();
            if let Err(e) = entry.script.run(self, ctx) {
                warn!(script = entry.script.name(), error = %e, "document script failed");
            }
            // The after-snapshot is taken even after a failure, so whatever
            // partial state resulted stays undoable.
            self.commit_snapshot(before);
        }
        // Scripts may themselves have scheduled more scripts; keep both.
        scripts.append(&mut self.scripts);
        self.scripts = scripts;
    }
}
