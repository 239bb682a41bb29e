use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use modsettings::{FileStore, Settings};
use modsettings_term::{app::App, cli::Cli, demo::Demo};

#[macro_use]
extern crate log;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.app_config()?;
    init_logging(&config.log_path())?;

    let demo = Demo::new();
    demo.register_global()?;
    let settings = Settings::startup_global(FileStore::new(), config.engine_config())?;
    info!("{}", config.hint());

    let mut app = App::new(settings, &config, demo)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal, Duration::from_millis(config.tick_rate_ms));
    ratatui::restore();
    if let Err(e) = &result {
        error!("{e:#}");
    }

    let mut settings = app.into_settings();
    settings
        .shutdown()
        .context("Failed to save preferences")?;
    println!(
        "{} {} pages to {}",
        "Saved".green().bold(),
        settings.pages().len(),
        settings.config().config_root.display()
    );
    result
}

/// Send log output to a file, the terminal belongs to the menu.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
