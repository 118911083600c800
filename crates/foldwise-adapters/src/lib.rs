//! Runtime adapters for Foldwise (HTTP backend, config, export files).

pub mod client;
pub mod config;
pub mod export;
pub mod util;

pub use client::HttpBackend;
pub use config::Config;
pub use export::save_instructions;
