use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Scale;
use crate::foundation::error::ExportResult;
use crate::plan::directive::ExportDirective;

/// Turns (object id, filename) pairs into one directive per configured scale.
///
/// Output directories are created on first use and remembered, so each distinct directory is
/// created once.
#[derive(Debug)]
pub struct ExportPlanner {
    outdir: PathBuf,
    scales: Vec<Scale>,
    created_dirs: HashSet<PathBuf>,
}

impl ExportPlanner {
    /// Plan exports into `outdir` at every scale in `scales` (defaults to `1x` and `2x` when
    /// empty).
    pub fn new(outdir: impl Into<PathBuf>, scales: &[Scale]) -> Self {
        let scales = if scales.is_empty() {
            Scale::defaults()
        } else {
            scales.to_vec()
        };
        Self {
            outdir: outdir.into(),
            scales,
            created_dirs: HashSet::new(),
        }
    }

    /// Scales every object is exported at.
    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    /// Output path for `filename` at `scale`: `outdir/{filename}{suffix}.png`.
    pub fn output_path(&self, filename: &str, scale: Scale) -> PathBuf {
        self.outdir
            .join(format!("{filename}{}.png", scale.suffix()))
    }

    /// One directive per scale for object `id`, creating output directories as needed.
    pub fn directives(&mut self, id: &str, filename: &str) -> ExportResult<Vec<ExportDirective>> {
        let mut out = Vec::with_capacity(self.scales.len());
        for &scale in &self.scales {
            let path = self.output_path(filename, scale);
            if let Some(parent) = path.parent() {
                ensure_dir(&mut self.created_dirs, parent)?;
            }
            out.push(ExportDirective {
                id: id.to_owned(),
                filename: path,
                dpi: scale.dpi(),
            });
        }
        Ok(out)
    }
}

fn ensure_dir(created: &mut HashSet<PathBuf>, dir: &Path) -> ExportResult<()> {
    if dir.as_os_str().is_empty() || created.contains(dir) {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    created.insert(dir.to_path_buf());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plan/compiler.rs"]
mod tests;
