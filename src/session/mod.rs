//! Per-file export pipeline.

/// Options, report and the [`export_session::ExportSession`] driver.
pub mod export_session;
/// Scoped `.patched` working copy of a rewritten document.
pub mod working_copy;
