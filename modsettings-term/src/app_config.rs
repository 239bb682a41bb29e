//! Host configuration.
//!
//! Read from an optional `.toml` or `.json` file, then overridden from the
//! command line.
//!
//! ```toml
//! config_root = "Mods/config"
//! toggle_key = "F5"
//! tick_rate_ms = 50
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use crossterm::event::KeyCode;
use modsettings::Config;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Log file written under the config root.
pub const LOG_FILE: &str = "modsettings.log";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory of preference files.
    pub config_root: PathBuf,
    /// Key that shows or hides the settings menu.
    pub toggle_key: String,
    /// Input poll timeout per frame.
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_root: Config::default().config_root,
            toggle_key: "F5".to_string(),
            tick_rate_ms: 50,
        }
    }
}

impl AppConfig {
    /// Load from `path`; the format follows the file extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        to_typed(&content, &ext).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Preference store layout for the engine.
    pub fn engine_config(&self) -> Config {
        Config::with_root(&self.config_root)
    }

    pub fn toggle_key(&self) -> anyhow::Result<KeyCode> {
        parse_key(&self.toggle_key)
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_root.join(LOG_FILE)
    }

    /// Message shown while the menu is hidden.
    pub fn hint(&self) -> String {
        format!("Press {} to open the settings menu.", self.toggle_key)
    }
}

fn to_typed<C: DeserializeOwned>(s: &str, ext: &str) -> anyhow::Result<C> {
    let c = match ext {
        "json" => serde_json::from_str::<C>(s)?,
        "toml" => toml::from_str::<C>(s)?,
        _ => {
            bail!("unsupported config file extension: {ext}");
        }
    };
    Ok(c)
}

/// Parse a key name such as `F5`, `Esc` or `m`.
pub fn parse_key(name: &str) -> anyhow::Result<KeyCode> {
    let name = name.trim();
    if let Some(n) = name.strip_prefix(['F', 'f'])
        && let Ok(n) = n.parse::<u8>()
        && (1..=24).contains(&n)
    {
        return Ok(KeyCode::F(n));
    }

    let key = match name.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "insert" => KeyCode::Insert,
        "delete" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => bail!("unknown key: {name}"),
            }
        }
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.toggle_key().unwrap(), KeyCode::F(5));
        assert_eq!(config.tick_rate_ms, 50);
        assert_eq!(config.log_path(), PathBuf::from("Mods/config/modsettings.log"));
        assert_eq!(config.hint(), "Press F5 to open the settings menu.");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("host.toml");
        fs::write(&toml_path, "toggle_key = \"F9\"\ntick_rate_ms = 20\n").unwrap();
        let config = AppConfig::load(&toml_path).unwrap();
        assert_eq!(config.toggle_key, "F9");
        assert_eq!(config.tick_rate_ms, 20);
        assert_eq!(config.config_root, AppConfig::default().config_root);

        let json_path = dir.path().join("host.json");
        fs::write(&json_path, r#"{"config_root": "/srv/prefs"}"#).unwrap();
        let config = AppConfig::load(&json_path).unwrap();
        assert_eq!(config.config_root, PathBuf::from("/srv/prefs"));
        assert_eq!(config.toggle_key, "F5");

        let yaml_path = dir.path().join("host.yaml");
        fs::write(&yaml_path, "toggle_key: F9").unwrap();
        assert!(AppConfig::load(&yaml_path).is_err());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("F12").unwrap(), KeyCode::F(12));
        assert_eq!(parse_key("f1").unwrap(), KeyCode::F(1));
        assert_eq!(parse_key("Esc").unwrap(), KeyCode::Esc);
        assert_eq!(parse_key("m").unwrap(), KeyCode::Char('m'));
        assert_eq!(parse_key("F").unwrap(), KeyCode::Char('F'));
        assert!(parse_key("F99").is_err());
        assert!(parse_key("ctrl").is_err());
    }
}
