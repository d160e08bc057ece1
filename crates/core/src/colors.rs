use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// One extension → colour assignment used by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMapping {
    pub extension: String,
    pub color: String,
    pub name: String,
}

impl ColorMapping {
    pub fn new(
        extension: impl Into<String>,
        color: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            color: color.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ColorStoreError {
    #[error("no user configuration directory available")]
    NoConfigDir,
    #[error("failed to write colour mappings")]
    Io(#[from] io::Error),
    #[error("failed to encode colour mappings")]
    Json(#[from] serde_json::Error),
}

/// JSON-backed persistence for the colour table.
///
/// User edits land in one pretty-printed file under the config directory;
/// when that file is absent or unparsable the built-in defaults apply.
#[derive(Debug, Clone)]
pub struct ColorStore {
    path: PathBuf,
}

impl ColorStore {
    /// Store at the conventional per-user location,
    /// `<config dir>/drivescope/color-mappings.json`.
    pub fn open_default() -> Result<Self, ColorStoreError> {
        let dir = dirs::config_dir().ok_or(ColorStoreError::NoConfigDir)?;
        Ok(Self::at(dir.join("drivescope").join("color-mappings.json")))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current mappings: the user file when present and well-formed,
    /// otherwise the built-in defaults.
    pub fn load(&self) -> Vec<ColorMapping> {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(mappings) => mappings,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "colour mappings unparsable, using defaults");
                    default_mappings()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => default_mappings(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "colour mappings unreadable, using defaults");
                default_mappings()
            }
        }
    }

    /// Persist `mappings`, creating parent directories on first save.
    pub fn save(&self, mappings: &[ColorMapping]) -> Result<(), ColorStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(mappings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Overwrite the user file with the defaults and return them.
    pub fn reset(&self) -> Result<Vec<ColorMapping>, ColorStoreError> {
        let defaults = default_mappings();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

/// Built-in table shipped with the application.
pub fn default_mappings() -> Vec<ColorMapping> {
    vec![
        ColorMapping::new("pdf", "#e74c3c", "Documents"),
        ColorMapping::new("doc", "#3498db", "Documents"),
        ColorMapping::new("docx", "#3498db", "Documents"),
        ColorMapping::new("txt", "#95a5a6", "Text"),
        ColorMapping::new("md", "#95a5a6", "Text"),
        ColorMapping::new("jpg", "#2ecc71", "Images"),
        ColorMapping::new("jpeg", "#2ecc71", "Images"),
        ColorMapping::new("png", "#27ae60", "Images"),
        ColorMapping::new("gif", "#27ae60", "Images"),
        ColorMapping::new("svg", "#16a085", "Images"),
        ColorMapping::new("mp3", "#9b59b6", "Audio"),
        ColorMapping::new("flac", "#9b59b6", "Audio"),
        ColorMapping::new("mp4", "#8e44ad", "Video"),
        ColorMapping::new("mkv", "#8e44ad", "Video"),
        ColorMapping::new("zip", "#f39c12", "Archives"),
        ColorMapping::new("gz", "#f39c12", "Archives"),
        ColorMapping::new("tar", "#f39c12", "Archives"),
        ColorMapping::new("rs", "#e67e22", "Code"),
        ColorMapping::new("js", "#f1c40f", "Code"),
        ColorMapping::new("py", "#2980b9", "Code"),
        ColorMapping::new("exe", "#c0392b", "Executables"),
        ColorMapping::new("iso", "#7f8c8d", "Disk images"),
    ]
}
