//! Engine configuration.
//!
//! ```toml
//! config_root = "Mods/config"
//! extension = "cfg"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where preference categories are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one preference file per page.
    pub config_root: PathBuf,
    /// File extension of preference files, without the dot.
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from("Mods").join("config"),
            extension: "cfg".to_string(),
        }
    }
}

impl Config {
    /// Config rooted at `config_root` with the default extension.
    pub fn with_root(config_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
            ..Default::default()
        }
    }

    /// Canonical preference file of page `name`: `<config_root>/<name>.<extension>`.
    pub fn category_path(&self, name: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.config_root.join(name)
        } else {
            self.config_root.join(format!("{name}.{}", self.extension))
        }
    }
}
