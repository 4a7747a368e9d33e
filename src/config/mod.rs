use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::codec::DEFAULT_DELIMITER;
use crate::error::Error;
use crate::store::RecordStore;

/// Defaults for opening a store, read from a YAML or JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Bound data file. Relative paths are resolved against the settings file.
    pub path: PathBuf,
    pub delimiter: char,
    /// Header written when `path` does not exist yet.
    pub header: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("default.csv"),
            delimiter: DEFAULT_DELIMITER,
            header: vec!["id".into(), "name".into(), "age".into()],
        }
    }
}

impl Settings {
    /// Load from `*.yaml`/`*.yml` or `*.json`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let mut settings: Settings = match ext.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing YAML settings {}", path.display()))?,
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON settings {}", path.display()))?,
            _ => bail!("unsupported settings format: {}", path.display()),
        };

        if settings.path.is_relative() {
            if let Some(dir) = path.parent() {
                settings.path = dir.join(&settings.path);
            }
        }
        Ok(settings)
    }

    /// Open the configured file, creating it with `header` if it is missing.
    pub fn open_store(&self) -> Result<RecordStore> {
        match RecordStore::open_with(&self.path, self.delimiter) {
            Ok(store) => Ok(store),
            Err(Error::NotFound { .. }) => {
                info!(path = %self.path.display(), "data file missing, creating");
                RecordStore::create_with(&self.path, self.header.iter().cloned(), self.delimiter)
                    .with_context(|| format!("creating {}", self.path.display()))
            }
            Err(e) => Err(e).with_context(|| format!("opening {}", self.path.display())),
        }
    }
}
