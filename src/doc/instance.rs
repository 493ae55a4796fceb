//! Live deep-copy instances of a document.
//!
//! The game runtime places many on-screen objects that share one authored
//! asset but animate independently. Each instance holds its own copies of
//! every per-frame array (never aliasing the source's storage) while sharing
//! the source's charset and palette handles read-only.

use std::rc::Rc;

use crate::charset::Charset;
use crate::grid::{Tile, TileGrids};
use crate::ledger::ChangeLedger;
use crate::palette::Palette;

/// An independently-animating deep copy of a [`super::Document`].
pub struct DocInstance {
    grids: TileGrids,
    frame_delays: Vec<f32>,
    ledger: ChangeLedger,
    /// Refresh from source automatically whenever the source changes during
    /// its update tick.
    pub auto_refresh: bool,
    pub charset: Rc<Charset>,
    pub palette: Rc<Palette>,
    current_frame: usize,
    frame_elapsed: f32,
}

impl DocInstance {
    pub(crate) fn new(
        grids: &TileGrids,
        frame_delays: &[f32],
        charset: Rc<Charset>,
        palette: Rc<Palette>,
        auto_refresh: bool,
    ) -> Self {
        let mut ledger = ChangeLedger::new(grids.frames());
        ledger.mark_all_frames();
        ledger.geometry_changed = true;
        Self {
            grids: grids.clone(),
            frame_delays: frame_delays.to_vec(),
            ledger,
            auto_refresh,
            charset,
            palette,
            current_frame: 0,
            frame_elapsed: 0.0,
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

    pub fn get_tile(&self, frame: usize, layer: usize, x: usize, y: usize) -> Tile {
        self.grids.get(frame, layer, x, y)
    }

    /// Write one tile of this instance's own storage. Divergence from the
    /// source is expected (that is what instances are for); it survives until
    /// the next restore from source.
    pub fn set_tile(&mut self, frame: usize, layer: usize, x: usize, y: usize, tile: Tile) {
        self.grids.set(frame, layer, x, y, tile);
        self.ledger.mark(frame, crate::ledger::ChannelSet::ALL);
    }

    /// Frame this instance currently displays.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Advance this instance's own animation clock through its frame delays,
    /// wrapping at the end. Instances animate independently of their source
    /// and of each other.
    pub fn advance(&mut self, dt: f32) {
        if self.frame_count() < 2 {
            return;
        }
        if self.frame_delays[self.current_frame] <= 0.0 {
            return;
        }
        self.frame_elapsed += dt;
        while self.frame_elapsed >= self.frame_delays[self.current_frame] {
            self.frame_elapsed -= self.frame_delays[self.current_frame];
            self.current_frame = (self.current_frame + 1) % self.frame_count();
            if self.frame_delays[self.current_frame] <= 0.0 {
                self.frame_elapsed = 0.0;
                break;
            }
        }
    }

    /// One-way synchronization from the source document: deep-copies the
    /// source's current arrays, marks every frame changed, and forces the
    /// next consumer refresh. Divergent instance state is discarded; nothing
    /// ever flows back to the source.
    pub(crate) fn restore_from(&mut self, grids: &TileGrids, frame_delays: &[f32]) {
        self.grids = grids.clone();
        self.frame_delays = frame_delays.to_vec();
        self.ledger = ChangeLedger::new(self.grids.frames());
        self.ledger.mark_all_frames();
        self.ledger.geometry_changed = true;
        self.current_frame = self.current_frame.min(self.frame_count().saturating_sub(1));
    }

    /// Dirty flags accumulated since the last take, cleared on return; the
    /// instance's consumer (the game runtime's sprite sync) drains this once
    /// per tick.
    pub fn take_changes(&mut self) -> ChangeLedger {
        let frames = self.grids.frames();
        std::mem::replace(&mut self.ledger, ChangeLedger::new(frames))
    }
}
