//! Error taxonomy shared by every Foldwise layer.
//!
//! None of these are fatal: each one ends the current user action and is
//! surfaced as a message, after which the session stays usable.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Form field that failed geometry validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryField {
    Pages,
    Height,
    PageWidth,
    Width,
}

impl GeometryField {
    pub const ALL: [GeometryField; 4] = [
        GeometryField::Pages,
        GeometryField::Height,
        GeometryField::PageWidth,
        GeometryField::Width,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GeometryField::Pages => "page count",
            GeometryField::Height => "book height",
            GeometryField::PageWidth => "page width",
            GeometryField::Width => "book width",
        }
    }
}

impl fmt::Display for GeometryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client-side validation failures. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid {field}: enter a positive number")]
    InvalidGeometry { field: GeometryField },

    #[error("Please enter some text to fold")]
    EmptyText,

    #[error("Please select a template")]
    NoTemplateSelected,
}

/// A selection call that is not allowed in the current mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot select template '{template_id}' while in text mode")]
pub struct InvalidStateError {
    pub template_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Template id '{id}' appears in both '{first}' and '{second}'")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Malformed template list for category '{category}': {reason}")]
    Malformed { category: String, reason: String },
}

/// Failures of a call to the pattern service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Non-2xx response. `message` is the server's `error` string when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl RequestError {
    /// Fallback text when the server gave no usable `error` field.
    pub const GENERIC_SERVER_MESSAGE: &'static str = "Pattern service returned an error";

    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("{} ({})", Self::GENERIC_SERVER_MESSAGE, status));
        RequestError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Nothing to export yet: generate a pattern first")]
    NoCurrentPattern,

    #[error("Export failed: {0}")]
    Request(#[from] RequestError),
}
