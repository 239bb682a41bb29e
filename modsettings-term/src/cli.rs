use std::path::PathBuf;

use clap::Parser;

use crate::app_config::AppConfig;

/// Terminal host for modsettings pages.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Host config file (.toml or .json).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of preference files.
    #[arg(long)]
    pub config_root: Option<PathBuf>,

    /// Key that shows or hides the settings menu, e.g. F5.
    #[arg(short, long)]
    pub toggle_key: Option<String>,

    /// Input poll timeout per frame, in milliseconds.
    #[arg(long)]
    pub tick_rate_ms: Option<u64>,
}

impl Cli {
    /// Config file values overridden by the flags given on the command line.
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(root) = &self.config_root {
            config.config_root = root.clone();
        }
        if let Some(key) = &self.toggle_key {
            config.toggle_key = key.clone();
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        // fail before the terminal is taken over
        config.toggle_key()?;
        Ok(config)
    }
}
