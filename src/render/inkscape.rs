use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{ExportError, ExportResult};
use crate::plan::directive::{ExportDirective, actions_text};
use crate::render::backend::Renderer;

/// Options for [`InkscapeRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InkscapeOpts {
    /// Inkscape executable.
    pub program: PathBuf,
}

impl Default for InkscapeOpts {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

/// Platform default Inkscape executable.
pub fn default_program() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Inkscape\bin\inkscape")
    } else {
        PathBuf::from("inkscape")
    }
}

/// Renders batches by running `inkscape <file> --actions=<batch>` and waiting for it.
#[derive(Clone, Debug, Default)]
pub struct InkscapeRenderer {
    opts: InkscapeOpts,
}

impl InkscapeRenderer {
    /// Create a renderer using `opts`.
    pub fn new(opts: InkscapeOpts) -> Self {
        Self { opts }
    }

    /// Arguments passed to the executable for one batch.
    pub fn args(target: &Path, batch: &[ExportDirective]) -> Vec<std::ffi::OsString> {
        vec![
            target.as_os_str().to_owned(),
            format!("--actions={}", actions_text(batch)).into(),
        ]
    }
}

impl Renderer for InkscapeRenderer {
    fn run(&mut self, target: &Path, batch: &[ExportDirective]) -> ExportResult<()> {
        let args = Self::args(target, batch);
        tracing::info!(file = %target.display(), exports = batch.len(), "invoking Inkscape");
        tracing::debug!(program = %self.opts.program.display(), ?args, "renderer command line");

        let output = Command::new(&self.opts.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ExportError::Other(anyhow::anyhow!(
                    "failed to run renderer '{}' (is Inkscape installed? use --inkscape to set its path): {e}",
                    self.opts.program.display()
                ))
            })?;

        if !output.status.success() {
            return Err(ExportError::Renderer {
                status: output.status.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/inkscape.rs"]
mod tests;
