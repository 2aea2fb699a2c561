//! Renderer seam and its implementations.

/// Renderer trait plus in-memory and dry-run renderers.
pub mod backend;
/// Inkscape subprocess renderer.
pub mod inkscape;
