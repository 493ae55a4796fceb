//! Textel - tile-grid ASCII/ANSI art document model
//!
//! This library provides the document core of a tile-grid art editor:
//! - The `Document`: frames x layers x tiles of (char, fg, bg, transform)
//! - An undo/redo command stack recording reversible tile deltas
//! - A change-tracking ledger driving exact renderer buffer refreshes
//! - Structural edits (resize, frame/layer lifecycle), bulk operations,
//!   document instances, and JSON serialization

pub mod charset;
pub mod cli;
pub mod doc;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod ledger;
pub mod models;
pub mod palette;
pub mod registry;
pub mod render;
pub mod script;
pub mod transform;
pub mod undo;

pub use charset::Charset;
pub use doc::{DocInstance, Document, EditContext, LayerMeta, TileCoord, TileIter};
pub use error::{LoadError, SaveError, ScriptError};
pub use geometry::{build_geometry, TileGeometry};
pub use grid::{Tile, TileGrids};
pub use ledger::{ChangeLedger, ChannelSet};
pub use palette::Palette;
pub use registry::{CharsetRegistry, PaletteRegistry, Registry};
pub use render::DocRenderer;
pub use script::DocScript;
pub use transform::TileTransform;
