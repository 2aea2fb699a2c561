use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::animation::animator::FrameAnimator;
use crate::document::tree::Document;
use crate::document::xml::parse;
use crate::foundation::core::Scale;
use crate::foundation::error::{ExportError, ExportResult};
use crate::plan::batch::Batch;
use crate::plan::compiler::ExportPlanner;
use crate::render::backend::Renderer;
use crate::resolve::resolver::{ExportItem, ResolveOptions, resolve};
use crate::session::working_copy::WorkingCopy;

/// Options shared by every file of a run.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Resolution multipliers; empty means `1x` and `2x`.
    pub scales: Vec<Scale>,
    /// Root directory for output PNGs.
    pub outdir: PathBuf,
    /// Object discovery options.
    pub resolve: ResolveOptions,
    /// Leave the `.patched` working copy on disk after exporting.
    pub keep_working_copy: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scales: Scale::defaults(),
            outdir: PathBuf::from("."),
            resolve: ResolveOptions::default(),
            keep_working_copy: false,
        }
    }
}

/// Summary of one exported file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Input file.
    pub file: PathBuf,
    /// Objects found.
    pub objects: usize,
    /// Directives sent to the renderer.
    pub directives: usize,
    /// Renderer invocations.
    pub invocations: usize,
    /// A working copy was written for this file.
    pub rewritten: bool,
}

/// Exports files one at a time through a [`Renderer`].
pub struct ExportSession<'r> {
    opts: ExportOptions,
    renderer: &'r mut dyn Renderer,
}

impl<'r> ExportSession<'r> {
    /// Create a session rendering through `renderer`.
    pub fn new(opts: ExportOptions, renderer: &'r mut dyn Renderer) -> Self {
        Self { opts, renderer }
    }

    /// Options of this session.
    pub fn options(&self) -> &ExportOptions {
        &self.opts
    }

    /// Export every file in order, stopping at the first error.
    pub fn export_files<P: AsRef<Path>>(&mut self, files: &[P]) -> ExportResult<Vec<ExportReport>> {
        files.iter().map(|f| self.export_file(f.as_ref())).collect()
    }

    /// Parse, resolve and export one SVG file.
    ///
    /// Still objects are exported first, in batches, from the static document. Animated objects
    /// follow, one renderer call per frame against a freshly written working copy.
    #[tracing::instrument(skip(self), fields(file = %path.display()))]
    pub fn export_file(&mut self, path: &Path) -> ExportResult<ExportReport> {
        tracing::info!("processing {}", path.display());

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let mut doc = parse(&text).map_err(|e| match e {
            ExportError::Parse(msg) => ExportError::parse(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        let resolution = resolve(&mut doc, &self.opts.resolve)?;
        tracing::info!("found {} objects to export", resolution.items.len());

        let mut report = ExportReport {
            file: path.to_path_buf(),
            objects: resolution.items.len(),
            ..ExportReport::default()
        };
        let working = if resolution.needs_rewrite || resolution.has_animation() {
            report.rewritten = true;
            Some(WorkingCopy::create(path, &doc, self.opts.keep_working_copy)?)
        } else {
            None
        };
        let target = working
            .as_ref()
            .map_or_else(|| path.to_path_buf(), |w| w.path().to_path_buf());

        let mut planner = ExportPlanner::new(&self.opts.outdir, &self.opts.scales);

        let mut batch = Batch::new();
        for item in resolution.items.iter().filter(|i| !i.is_animated()) {
            tracing::info!("exporting {}", item.filename);
            for directive in planner.directives(&item.id, &item.filename)? {
                report.directives += 1;
                if batch.enqueue(directive, &mut *self.renderer, &target)? {
                    report.invocations += 1;
                }
            }
        }
        if batch.flush(&mut *self.renderer, &target)? {
            report.invocations += 1;
        }

        if let Some(working) = &working {
            for item in resolution.items.iter().filter(|i| i.is_animated()) {
                self.export_frames(&mut doc, item, working, &mut planner, &mut report)?;
            }
        }

        if let Some(working) = working {
            working.finish()?;
        }
        tracing::info!("finished {}", path.display());
        Ok(report)
    }

    /// Render, serialize and export each frame of `item` in turn, then restore the document.
    fn export_frames(
        &mut self,
        doc: &mut Document,
        item: &ExportItem,
        working: &WorkingCopy,
        planner: &mut ExportPlanner,
        report: &mut ExportReport,
    ) -> ExportResult<()> {
        let animator = FrameAnimator::new(doc, item, &self.opts.resolve.annotations)?;
        let clock = animator.clock();
        tracing::info!("exporting {} ({} frames)", item.filename, clock.count());

        for frame in clock.frames() {
            animator.render_frame(doc, frame);
            working.write(doc)?;

            let filename = animator.filename(frame);
            tracing::debug!(frame, %filename, "exporting frame");
            let mut batch = Batch::new();
            for directive in planner.directives(&item.id, &filename)? {
                report.directives += 1;
                if batch.enqueue(directive, &mut *self.renderer, working.path())? {
                    report.invocations += 1;
                }
            }
            if batch.flush(&mut *self.renderer, working.path())? {
                report.invocations += 1;
            }
        }

        animator.restore(doc);
        working.write(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export_session.rs"]
mod tests;
