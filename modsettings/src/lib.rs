//! # modsettings
//!
//! Declarative settings pages for independently developed host modules.
//!
//! A module describes a page of controls bound to fields and methods of its
//! own state, registers it once at startup, and gets the page drawn through
//! any immediate-mode GUI plus its values persisted across sessions.
//!
//! ## Features
//!
//! - Closed set of control descriptors, type-checked when constructed
//! - Accessors over arbitrary host state, with no reflection
//! - Ordered page registry that freezes at startup
//! - Create-defaults / load / save / reset persistence against a
//!   pluggable preference store (TOML files included)
//! - GUI-agnostic rendering through the [`Ui`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use modsettings::{Config, Control, MemoryStore, Registry, Settings, field};
//!
//! struct Flashlight {
//!     enabled: bool,
//!     brightness: f32,
//! }
//!
//! let state = Arc::new(Mutex::new(Flashlight { enabled: true, brightness: 0.8 }));
//!
//! let mut registry = Registry::new();
//! registry.register_page(
//!     "Flashlight",
//!     state.clone(),
//!     vec![
//!         Control::toggle(field!(Flashlight, enabled), "Enabled")?,
//!         Control::horizontal_slider(field!(Flashlight, brightness), 0.0, 1.0)?,
//!     ],
//! )?;
//!
//! let mut settings = Settings::startup(registry, MemoryStore::new(), Config::default())?;
//! state.lock().unwrap().brightness = 0.3;
//! settings.shutdown()?;
//! # Ok::<(), modsettings::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Values, accessors, control descriptors and pages
//! - [`registry`] - Page registry and its process-wide instance
//! - [`persist`] - Persistence operations
//! - [`store`] - Preference stores
//! - [`render`] - Rendering dispatcher
//! - [`menu`] - Page list / open page navigation
//! - [`settings`] - Startup and shutdown sequencing

#[macro_use]
extern crate log;

/// Engine configuration.
pub mod config;

/// Values, accessors, control descriptors and pages.
pub mod data;

/// Error types and result definitions.
pub mod error;

/// Settings menu state machine.
pub mod menu;

/// Create-defaults, load, save and reset for one page.
pub mod persist;

/// Page registry with a two-phase lifecycle.
pub mod registry;

/// Rendering dispatcher from controls to [`Ui`] calls.
pub mod render;

/// Startup/shutdown facade over pages and a store.
pub mod settings;

/// Preference store trait and implementations.
pub mod store;

/// Immediate-mode GUI primitives.
pub mod ui;

pub use config::Config;
pub use data::{
    Accessor, Action, Bound, Control, Enumeration, FieldType, Host, HostObject, Page, Value,
    ValueKind, format_name,
};
pub use error::{Error, Result};
pub use menu::Menu;
pub use registry::{Registry, register_page, register_page_with_reset};
pub use settings::Settings;
pub use store::{Category, Entry, FileStore, MemoryStore, PreferenceStore};
pub use ui::Ui;
