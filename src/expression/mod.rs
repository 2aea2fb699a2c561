//! Restricted expression and template language for filename patterns and frame directives.
//!
//! Templates interpolate `${expr}` segments. Expressions can only read the bound frame
//! variables (`x`, `frame`) and call a fixed set of math builtins; there is no way to reach
//! anything else from document content.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod template;

pub use eval::{Bindings, Value};
pub use template::Template;
