use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::document::tree::Document;
use crate::document::xml::serialize;
use crate::foundation::error::ExportResult;

/// A serialized copy of a modified document, written beside the input file.
///
/// The file is removed by [`WorkingCopy::finish`], or on drop when processing stops early,
/// unless it was created with `keep` set.
#[derive(Debug)]
pub struct WorkingCopy {
    path: PathBuf,
    keep: bool,
    done: bool,
}

impl WorkingCopy {
    /// Working copy path for `input`: `dir/name.svg` becomes `dir/name.patched.svg`.
    pub fn path_for(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{stem}.patched.svg"))
    }

    /// Write `doc` to the working copy path of `input`.
    pub fn create(input: &Path, doc: &Document, keep: bool) -> ExportResult<Self> {
        let copy = Self {
            path: Self::path_for(input),
            keep,
            done: false,
        };
        copy.write(doc)?;
        Ok(copy)
    }

    /// Location of the working copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the working copy with the current state of `doc`.
    pub fn write(&self, doc: &Document) -> ExportResult<()> {
        let text = serialize(doc)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write working copy '{}'", self.path.display()))?;
        Ok(())
    }

    /// Remove the working copy (unless kept), reporting failures.
    pub fn finish(mut self) -> ExportResult<()> {
        self.done = true;
        if self.keep {
            tracing::info!(file = %self.path.display(), "keeping working copy");
            return Ok(());
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("failed to remove working copy '{}'", self.path.display()))?;
        Ok(())
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        if !self.done && !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/working_copy.rs"]
mod tests;
