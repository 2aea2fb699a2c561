//! Generic attributed XML tree used to discover, patch and re-serialize SVG documents.

/// Arena-backed document tree.
pub mod tree;
/// `quick-xml` based parsing and serialization.
pub mod xml;
