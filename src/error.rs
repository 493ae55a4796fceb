//! Error types for loading, saving, and script execution.

use thiserror::Error;

/// Error loading a serialized document. Any of these is a hard load failure:
/// no document is produced and the caller falls back to a blank one.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The named charset could not be resolved by the registry.
    #[error("charset '{0}' not found")]
    CharsetNotFound(String),
    /// The named palette could not be resolved by the registry.
    #[error("palette '{0}' not found")]
    PaletteNotFound(String),
    #[error("document has no frames")]
    NoFrames,
    #[error("document dimensions must be positive ({width}x{height})")]
    EmptyDimensions { width: usize, height: usize },
    #[error("frame {frame} has {got} layers, expected {expected}")]
    LayerCountMismatch { frame: usize, got: usize, expected: usize },
    #[error("frame {frame} layer {layer} has {got} tiles, expected {expected}")]
    TileCountMismatch { frame: usize, layer: usize, got: usize, expected: usize },
}

/// Error writing a document to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure raised by a document script.
///
/// Caught at the run site, logged, and reported as a transient message; a
/// failing script never aborts its enclosing command or the editing session.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ScriptError {
    pub message: String,
}

impl ScriptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
