//! Batch export of named SVG objects to PNG through Inkscape.
//!
//! Objects are discovered by convention: any element with a `<title>` child (or an explicit
//! `data-export-filename` attribute) and an `id` is exported once per scale, at
//! `96 * scale` DPI, to `outdir/{name}{@Nx}.png`.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: SVG text -> [`Document`] (arena tree that round-trips back to XML)
//! 2. **Resolve**: find [`ExportItem`]s, apply `data-export-transparent` style patches
//! 3. **Plan**: items x scales -> [`ExportDirective`]s, batched under a command line ceiling
//! 4. **Render**: each batch is handed to a [`Renderer`] (normally [`InkscapeRenderer`])
//!
//! Objects with `data-export-frames="N"` are exported as an N-frame sequence: for every frame
//! the `data-export-animate` directives of the nodes beneath them are evaluated, the document
//! is rewritten and that frame is rendered before the next one is computed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod document;
mod expression;
mod foundation;
mod plan;
mod render;
mod resolve;
mod session;

pub use animation::animator::{AttributeTemplate, FrameAnimator, parse_directive};
pub use animation::clock::FrameClock;
pub use document::tree::{Document, Element, Node, NodeId};
pub use document::xml::{parse, serialize};
pub use expression::{Bindings, Template, Value};
pub use foundation::core::{BASE_DPI, Scale};
pub use foundation::error::{ExportError, ExportResult};
pub use plan::batch::{BATCH_CEILING, Batch};
pub use plan::compiler::ExportPlanner;
pub use plan::directive::{ExportDirective, actions_text};
pub use render::backend::{DryRunRenderer, Invocation, RecordingRenderer, Renderer};
pub use render::inkscape::{InkscapeOpts, InkscapeRenderer, default_program};
pub use resolve::annotations::Annotations;
pub use resolve::resolver::{ExportItem, Resolution, ResolveOptions, resolve};
pub use resolve::style::force_transparent_fill;
pub use session::export_session::{ExportOptions, ExportReport, ExportSession};
pub use session::working_copy::WorkingCopy;
