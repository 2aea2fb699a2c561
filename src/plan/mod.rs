//! Compilation of export items into renderer directives.

/// Size-capped directive batches.
pub mod batch;
/// Output paths and directive generation.
pub mod compiler;
/// One renderer export instruction.
pub mod directive;
