use foldwise_core::{PatternResult, RequestError, TemplateCatalog, Ticket};
use std::path::PathBuf;

/// Messages from background tasks to the main UI thread.
pub enum BackgroundMessage {
    /// Template catalog fetched and validated
    TemplatesLoaded(TemplateCatalog),
    TemplatesError(RequestError),
    /// A generation call finished, successfully or not
    PatternFinished {
        ticket: Ticket,
        result: Result<PatternResult, RequestError>,
    },
    /// Instructions exported and written to disk
    ExportSaved { path: PathBuf, filename: String },
    ExportError(String),
    /// A background task panicked
    TaskFailed { task: &'static str, detail: String },
}
