//! Sandboxed document scripts.
//!
//! A script is a named callable given the document's public mutation API and
//! nothing else -- whether that callable wraps an embedded interpreter, a
//! restricted expression language, or compiled code is the host's business.
//! The contract that matters: script failures are caught at the run site,
//! logged, and never abort the enclosing command -- the command still commits
//! whatever partial state resulted, so the partial change stays undoable.

use crate::doc::{Document, EditContext};
use crate::error::ScriptError;

/// A named callable that edits a document through its public API.
pub trait DocScript {
    fn name(&self) -> &str;

    /// Run one edit pass. Errors are reported, not propagated; whatever the
    /// script wrote before failing remains in place and undoable.
    fn run(&mut self, doc: &mut Document, ctx: EditContext) -> Result<(), ScriptError>;
}

/// A script with its run schedule.
pub struct ScheduledScript {
    pub script: Box<dyn DocScript>,
    /// Seconds between runs; zero runs every tick.
    pub interval: f32,
    /// Document-clock time of the next due run.
    pub(crate) next_run: f32,
}

impl ScheduledScript {
    pub fn new(script: Box<dyn DocScript>, interval: f32) -> Self {
        // next_run 0.0: due on the first update after scheduling.
        Self { script, interval, next_run: 0.0 }
    }
}
