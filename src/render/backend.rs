use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ExportError, ExportResult};
use crate::plan::directive::ExportDirective;

/// Executes one batch of export directives against a document on disk.
///
/// Ordering contract: calls are made strictly one after another, and the file at `target` may
/// be rewritten between calls.
pub trait Renderer {
    /// Render every directive in `batch` from the document at `target`.
    fn run(&mut self, target: &Path, batch: &[ExportDirective]) -> ExportResult<()>;
}

/// One captured renderer call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Document the renderer was pointed at.
    pub target: PathBuf,
    /// Directives of the batch.
    pub directives: Vec<ExportDirective>,
    /// Contents of `target` at the time of the call, when readable.
    pub document: Option<String>,
}

/// In-memory renderer for tests and embedding: records every call instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    invocations: Vec<Invocation>,
    fail_at: Option<usize>,
}

impl RecordingRenderer {
    /// Create a renderer that accepts every batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer whose `n`th call (0-based) fails like a non-zero renderer exit.
    pub fn failing_at(n: usize) -> Self {
        Self {
            invocations: Vec::new(),
            fail_at: Some(n),
        }
    }

    /// Borrow the captured calls in order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// All directives across calls, in order.
    pub fn directives(&self) -> impl Iterator<Item = &ExportDirective> + '_ {
        self.invocations.iter().flat_map(|i| i.directives.iter())
    }
}

impl Renderer for RecordingRenderer {
    fn run(&mut self, target: &Path, batch: &[ExportDirective]) -> ExportResult<()> {
        let n = self.invocations.len();
        self.invocations.push(Invocation {
            target: target.to_path_buf(),
            directives: batch.to_vec(),
            document: std::fs::read_to_string(target).ok(),
        });
        if self.fail_at == Some(n) {
            return Err(ExportError::Renderer {
                status: "exit status: 1".to_owned(),
                stdout: format!("simulated failure on call {n}"),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct PlannedExport<'a> {
    target: &'a Path,
    #[serde(flatten)]
    directive: &'a ExportDirective,
}

/// Prints each directive as a JSON line instead of rendering.
#[derive(Debug)]
pub struct DryRunRenderer<W> {
    out: W,
}

impl<W: std::io::Write> DryRunRenderer<W> {
    /// Print to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: std::io::Write> Renderer for DryRunRenderer<W> {
    fn run(&mut self, target: &Path, batch: &[ExportDirective]) -> ExportResult<()> {
        for directive in batch {
            let line = serde_json::to_string(&PlannedExport { target, directive })
                .context("serialize planned export")?;
            writeln!(self.out, "{line}").context("write planned export")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
