//! Configuration management for foldwise
//!
//! Stores settings in ~/.config/foldwise/config.json

use anyhow::{anyhow, Context};
use foldwise_core::{FormGeometry, DEFAULT_PREVIEW_LIMIT, REFERENCE_BOOK_HEIGHT_MM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const SERVER_URL_ENV: &str = "FOLDWISE_SERVER_URL";

const MAX_TIMEOUT_SECS: u64 = 600;
const MAX_PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// Folds drawn in the book preview.
    pub preview_limit: usize,
    /// Book height the preview is scaled against.
    pub reference_height_mm: f64,
    /// Where exported instructions are written. Falls back to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Values the form starts with.
    pub default_geometry: FormGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            reference_height_mm: REFERENCE_BOOK_HEIGHT_MM,
            export_dir: None,
            default_geometry: FormGeometry::default(),
        }
    }
}

impl Config {
    fn sanitize(&mut self) {
        let trimmed = self.server_url.trim();
        self.server_url = if trimmed.is_empty() {
            DEFAULT_SERVER_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, MAX_TIMEOUT_SECS);
        self.preview_limit = self.preview_limit.clamp(1, MAX_PREVIEW_LIMIT);
        if !(self.reference_height_mm.is_finite() && self.reference_height_mm > 0.0) {
            self.reference_height_mm = REFERENCE_BOOK_HEIGHT_MM;
        }
        if self.default_geometry.validate().is_err() {
            self.default_geometry = FormGeometry::default();
        }
    }

    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("foldwise"))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from disk, or return default. The server URL env var wins
    /// over the file.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Load from an explicit path. A file that fails to parse is moved aside
    /// to `config.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            match serde_json::from_str::<Config>(&content) {
                Ok(mut config) => {
                    config.sanitize();
                    return config;
                }
                Err(err) => {
                    preserve_corrupt_config(path, &content);
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "config file was corrupted; a backup was saved and defaults were loaded"
                    );
                }
            }
        }
        Self::default()
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            self.override_server_url(&url);
        }
    }

    /// Blank values are ignored.
    pub fn override_server_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.server_url = url.to_string();
        }
    }

    pub fn override_timeout_secs(&mut self, secs: u64) {
        self.request_timeout_secs = secs.clamp(1, MAX_TIMEOUT_SECS);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Directory exports go to when none is given explicitly.
    pub fn export_dir_or_cwd(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Save config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        self.save_to(&dir.join("config.json"))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let mut sanitized = self.clone();
        sanitized.sanitize();

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(&sanitized).context("Failed to serialize config")?;
        write_atomic(path, &content).context("Failed to write config")?;
        Ok(())
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/foldwise/config.json".to_string())
    }
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

/// Write through a sibling temp file and rename over the target.
pub(crate) fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}
