//! Reversible edit commands and the linear undo/redo stack.
//!
//! A command groups the per-tile deltas of one logical user action (a brush
//! stroke, a script run, a structural edit). Tile commands record full
//! before/after 4-tuples per touched tile; structural edits and script runs
//! instead snapshot the whole document, because the set of tiles they touch
//! is unbounded and not easily enumerable.

use crate::doc::LayerMeta;
use crate::grid::{Tile, TileGrids};

/// One tile's recorded state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDelta {
    pub frame: usize,
    pub layer: usize,
    pub x: usize,
    pub y: usize,
    pub before: Tile,
    pub after: Tile,
}

impl TileDelta {
    /// A delta whose before-state equals its after-state is a no-op and may
    /// be dropped without affecting undo correctness.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Whole-document state captured around a structural edit or script run.
#[derive(Debug, Clone, PartialEq)]
pub struct DocSnapshot {
    pub grids: TileGrids,
    pub layers: Vec<LayerMeta>,
    pub frame_delays: Vec<f32>,
}

/// An atomic, committed, reversible group of tile-state changes.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Per-tile deltas; deltas on distinct tiles are independent, so undo may
    /// restore them in any order.
    Tiles(Vec<TileDelta>),
    /// Full before/after document state.
    Snapshot {
        before: Box<DocSnapshot>,
        after: Box<DocSnapshot>,
    },
}

impl EditCommand {
    fn is_noop(&self) -> bool {
        match self {
            EditCommand::Tiles(deltas) => deltas.is_empty(),
            EditCommand::Snapshot { before, after } => before == after,
        }
    }
}

/// Linear undo history: no branching. Committing a new command while
/// reversed commands sit on the redo list discards the redo list.
#[derive(Debug, Default)]
pub struct CommandStack {
    undo: Vec<EditCommand>,
    redo: Vec<EditCommand>,
}

impl CommandStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a completed command. No-op tile deltas are elided first; a
    /// command left with nothing to do is dropped entirely.
    pub fn commit(&mut self, mut command: EditCommand) {
        if let EditCommand::Tiles(deltas) = &mut command {
            deltas.retain(|d| !d.is_noop());
        }
        if command.is_noop() {
            return;
        }
        self.redo.clear();
        self.undo.push(command);
    }

    /// Most recent committed command, handed to the document for
    /// reverse-application. Pair with [`CommandStack::push_redo`].
    pub fn pop_undo(&mut self) -> Option<EditCommand> {
        self.undo.pop()
    }

    /// Most recent reversed command, handed to the document for
    /// re-application. Pair with [`CommandStack::push_undo`].
    pub fn pop_redo(&mut self) -> Option<EditCommand> {
        self.redo.pop()
    }

    pub fn push_redo(&mut self, command: EditCommand) {
        self.redo.push(command);
    }

    /// Return a redone command to the undo list without clearing redo.
    pub fn push_undo(&mut self, command: EditCommand) {
        self.undo.push(command);
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
