// src/document/formatter.rs
use tracing::{debug, warn};

use crate::error::PromptError;

use super::normalize;

/// Best-effort normalizer with a side channel for the last failure.
///
/// `format` never fails: a document that does not parse comes back
/// unchanged and the reason is kept in `last_error`.
#[derive(Debug, Default)]
pub struct DocumentFormatter {
    last_error: Option<PromptError>,
}

impl DocumentFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&mut self, document: &str) -> String {
        self.last_error = None;
        match normalize(document) {
            Ok(formatted) => {
                debug!(bytes = formatted.len(), "formatted document");
                formatted
            }
            Err(e) => {
                warn!(error = %e, "formatting failed, keeping original document");
                self.last_error = Some(e);
                document.to_string()
            }
        }
    }

    /// Failure of the most recent `format`, cleared on every call.
    pub fn last_error(&self) -> Option<&PromptError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<PromptError> {
        self.last_error.take()
    }
}
