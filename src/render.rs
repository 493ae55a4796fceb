//! The interface a rendering backend exposes to documents.
//!
//! The core never draws; it tells each attached renderer which buffers went
//! stale. A renderer registers interest via `Document::attach_renderer` and
//! the document holds only a weak reference -- it does not own renderer
//! lifetimes.

use crate::geometry::TileGeometry;
use crate::ledger::ChannelSet;

/// A rendering backend attached to one document.
pub trait DocRenderer {
    /// Frame this renderer is currently displaying.
    fn frame(&self) -> usize;

    /// Rebuild bindings from freshly built quad geometry. Called only after
    /// structural changes (resize, frame/layer count changes).
    fn rebind_geometry(&mut self, geometry: &TileGeometry);

    /// Re-upload exactly the given channel buffers for one frame -- never a
    /// full refresh when only one channel changed.
    fn refresh_channels(&mut self, frame: usize, channels: ChannelSet);
}
