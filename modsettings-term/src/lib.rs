//! Terminal host for modsettings pages.
//!
//! Registers the demo host modules, loads their preferences, and runs an
//! immediate-mode settings menu in the terminal. Preferences are saved on
//! exit.
//!
//! ## Modules
//!
//! - [`app`] - Frame loop and key routing
//! - [`app_config`] - Host configuration file
//! - [`cli`] - Command line
//! - [`demo`] - Demo host modules
//! - [`term_ui`] - Terminal implementation of [`modsettings::Ui`]

#[macro_use]
extern crate log;

/// Frame loop and key routing.
pub mod app;

/// Host configuration.
pub mod app_config;

/// Command line interface.
pub mod cli;

/// Demo host modules.
pub mod demo;

/// Immediate-mode terminal widgets.
pub mod term_ui;
