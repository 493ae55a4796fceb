//! Change-tracking ledger driving renderer buffer refreshes.
//!
//! One dirty-flag set per frame, one class per channel, plus a document-wide
//! geometry flag for structural changes. A flag is set in the same mutation
//! call that changed the data -- never batched or deferred -- so a renderer
//! can never miss a change. The whole ledger is cleared exactly once per
//! `Document::update()` after renderers have been told to refresh.

/// Which of the four tile channels changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSet {
    pub ch: bool,
    pub fg: bool,
    pub bg: bool,
    pub xform: bool,
}

impl ChannelSet {
    pub const NONE: ChannelSet = ChannelSet { ch: false, fg: false, bg: false, xform: false };
    pub const ALL: ChannelSet = ChannelSet { ch: true, fg: true, bg: true, xform: true };
    pub const CHAR: ChannelSet = ChannelSet { ch: true, fg: false, bg: false, xform: false };
    /// Both color flags together: the color setters mark fg and bg
    /// unconditionally (see the module notes in `doc`).
    pub const COLORS: ChannelSet = ChannelSet { ch: false, fg: true, bg: true, xform: false };
    pub const XFORM: ChannelSet = ChannelSet { ch: false, fg: false, bg: false, xform: true };

    pub fn any(self) -> bool {
        self.ch || self.fg || self.bg || self.xform
    }

    pub fn union(self, other: ChannelSet) -> ChannelSet {
        ChannelSet {
            ch: self.ch || other.ch,
            fg: self.fg || other.fg,
            bg: self.bg || other.bg,
            xform: self.xform || other.xform,
        }
    }
}

/// Per-frame dirty flags plus the document-wide geometry flag.
#[derive(Debug, Clone, Default)]
pub struct ChangeLedger {
    frames: Vec<ChannelSet>,
    /// Set on resize and on frame/layer count changes; cleared only after
    /// every attached renderer has rebound geometry.
    pub geometry_changed: bool,
}

impl ChangeLedger {
    pub fn new(frames: usize) -> Self {
        Self { frames: vec![ChannelSet::NONE; frames], geometry_changed: false }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Mark channels of one frame dirty.
    #[inline]
    pub fn mark(&mut self, frame: usize, channels: ChannelSet) {
        let entry = &mut self.frames[frame];
        *entry = entry.union(channels);
    }

    /// Mark every frame fully dirty (all four channels).
    pub fn mark_all_frames(&mut self) {
        for entry in &mut self.frames {
            *entry = ChannelSet::ALL;
        }
    }

    /// Dirty channels recorded for one frame since the last clear.
    pub fn frame_changes(&self, frame: usize) -> ChannelSet {
        self.frames.get(frame).copied().unwrap_or(ChannelSet::NONE)
    }

    /// True if any frame has any dirty channel.
    pub fn any_changed(&self) -> bool {
        self.frames.iter().any(|f| f.any())
    }

    /// Reset every per-frame flag. Frames with no attached renderer are
    /// cleared too, so the ledger never accumulates stale flags.
    pub fn clear_frames(&mut self) {
        for entry in &mut self.frames {
            *entry = ChannelSet::NONE;
        }
    }

    // Frame lifecycle mirrors of the tile-array operations: the per-frame
    // flag list and the tile arrays must stay in lockstep.

    pub fn insert_frame(&mut self, index: usize, channels: ChannelSet) {
        self.frames.insert(index, channels);
    }

    pub fn remove_frame(&mut self, index: usize) {
        self.frames.remove(index);
    }

    pub fn move_frame(&mut self, src: usize, dest: usize) {
        let entry = self.frames.remove(src);
        self.frames.insert(dest, entry);
    }
}
