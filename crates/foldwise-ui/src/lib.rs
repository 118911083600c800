//! Terminal UI layer for Foldwise.

pub mod app;
pub mod ui;

pub use app::run_tui;
