use std::path::Path;

use crate::foundation::error::ExportResult;
use crate::plan::directive::{ExportDirective, actions_text};
use crate::render::backend::Renderer;

/// Longest action list sent in one renderer invocation (keeps clear of the 32k command line
/// limit on Windows).
pub const BATCH_CEILING: usize = 32_000;

/// Directives waiting to be sent to the renderer in one invocation.
#[derive(Clone, Debug)]
pub struct Batch {
    directives: Vec<ExportDirective>,
    text_len: usize,
    ceiling: usize,
}

impl Default for Batch {
    fn default() -> Self {
        Self::with_ceiling(BATCH_CEILING)
    }
}

impl Batch {
    /// Create an empty batch with the default ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty batch flushing before its action text would exceed `ceiling` bytes.
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            directives: Vec::new(),
            text_len: 0,
            ceiling,
        }
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Number of pending directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Length of the action text the pending directives serialize to.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Pending directives.
    pub fn directives(&self) -> &[ExportDirective] {
        &self.directives
    }

    /// Queue `directive`, flushing first when adding it would push the action text past the
    /// ceiling. Returns `true` when a flush happened.
    ///
    /// A single directive longer than the ceiling is still sent, on its own.
    pub fn enqueue(
        &mut self,
        directive: ExportDirective,
        renderer: &mut dyn Renderer,
        target: &Path,
    ) -> ExportResult<bool> {
        let added = directive.actions().len();
        let flushed = if !self.is_empty() && self.text_len + 1 + added > self.ceiling {
            self.flush(renderer, target)?
        } else {
            false
        };
        self.text_len += if self.is_empty() { added } else { added + 1 };
        self.directives.push(directive);
        Ok(flushed)
    }

    /// Send all pending directives to the renderer against `target` and clear the batch.
    ///
    /// Returns `false` without invoking the renderer when the batch is empty.
    pub fn flush(&mut self, renderer: &mut dyn Renderer, target: &Path) -> ExportResult<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        tracing::debug!(
            file = %target.display(),
            directives = self.directives.len(),
            actions = %actions_text(&self.directives),
            "flush batch"
        );
        renderer.run(target, &self.directives)?;
        self.directives.clear();
        self.text_len = 0;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/batch.rs"]
mod tests;
