//! Application runtime for Foldwise
//!
//! The TUI loop, background calls to the pattern service, key handling and
//! the channel that carries results back to the main thread.

pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use runtime::run_tui;

use foldwise_core::PatternBackend;
use std::path::Path;
use std::sync::{mpsc, Arc};

/// Shared handles passed to input handling and background spawns.
pub struct RuntimeContext<'a> {
    /// Client for the pattern service
    pub backend: &'a Arc<dyn PatternBackend>,
    /// Where exported instruction files are written
    pub export_dir: &'a Path,
    /// Channel for sending messages to the main thread
    pub tx: &'a mpsc::Sender<messages::BackgroundMessage>,
}
