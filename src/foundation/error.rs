/// Convenience result type used across the exporter.
pub type ExportResult<T> = Result<T, ExportError>;

/// Top-level error taxonomy for document processing and rendering.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Malformed XML in the input document.
    #[error("parse error: {0}")]
    Parse(String),

    /// An export-marked node has no `id` attribute to address it by.
    #[error("object '{name}' has no id attribute")]
    MissingId {
        /// Export name (title or filename pattern) of the offending node.
        name: String,
    },

    /// Invalid export annotation on a node (frame count, frame directive).
    #[error("annotation error: {0}")]
    Annotation(String),

    /// Template or expression failure while computing a filename or attribute value.
    #[error("expression error in '{source_text}' at byte {offset}: {message}")]
    Expression {
        /// The template or expression text that failed.
        source_text: String,
        /// Byte offset into `source_text`.
        offset: usize,
        /// Human readable reason.
        message: String,
    },

    /// The external renderer exited unsuccessfully.
    #[error("renderer exited with {status}")]
    Renderer {
        /// Exit status description (`exit status: 1`, `signal: 9`, ...).
        status: String,
        /// Captured standard output of the renderer.
        stdout: String,
        /// Captured standard error of the renderer.
        stderr: String,
    },

    /// Invalid exporter options.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    /// Build an [`ExportError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build an [`ExportError::MissingId`] value.
    pub fn missing_id(name: impl Into<String>) -> Self {
        Self::MissingId { name: name.into() }
    }

    /// Build an [`ExportError::Annotation`] value.
    pub fn annotation(msg: impl Into<String>) -> Self {
        Self::Annotation(msg.into())
    }

    /// Build an [`ExportError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Return `true` for renderer failures, which terminate the whole run.
    pub fn is_renderer_failure(&self) -> bool {
        matches!(self, Self::Renderer { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
