//! Frame-by-frame attribute animation of export objects.

/// Per-frame mutation of the document tree.
pub mod animator;
/// Frame positions and zero-padded frame labels.
pub mod clock;
