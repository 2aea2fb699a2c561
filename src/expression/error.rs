use std::fmt;

use crate::foundation::error::ExportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExprError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl ExprError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }

    pub(crate) fn into_export(self, source_text: &str) -> ExportError {
        ExportError::Expression {
            source_text: source_text.to_owned(),
            offset: self.offset,
            message: self.message,
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ExprError {}
