//! Discovery of exportable objects and their annotations.

/// Annotation attribute names.
pub mod annotations;
/// Single-pass tree walk producing [`resolver::ExportItem`]s.
pub mod resolver;
/// Inline `style` attribute editing.
pub mod style;
