//! Preference store.
//!
//! A store holds one [`Category`] per page. Each category holds one
//! [`Entry`] per value-bearing control, keyed by accessor name, with a
//! current and a default value. Only current values are written out; the
//! defaults are whatever the host state held when the entry was created.

use std::path::Path;

use crate::{data::Value, error::Result};

/// TOML file per category.
pub mod file;

/// In-memory store without persistence.
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Backing store for preference categories.
pub trait PreferenceStore {
    /// Create the category `name` persisted at `path`, or return it if it
    /// already exists. Values previously saved at `path` are picked up by
    /// the entries created afterwards.
    fn create_category(&mut self, name: &str, path: &Path) -> Result<&mut Category>;

    fn category(&self, name: &str) -> Option<&Category>;

    fn category_mut(&mut self, name: &str) -> Option<&mut Category>;

    /// Persist the current values of category `name`.
    fn save_category(&mut self, name: &str) -> Result<()>;
}

/// A persisted key/value slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    current_value: Value,
    default_value: Value,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn current_value(&self) -> &Value {
        &self.current_value
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    pub fn set_current_value(&mut self, value: Value) {
        self.current_value = value;
    }

    pub fn reset_to_default(&mut self) {
        self.current_value = self.default_value.clone();
    }
}

/// A named group of entries, one per page.
#[derive(Debug, Clone, Default)]
pub struct Category {
    name: String,
    entries: Vec<Entry>,
    saved: toml::Table,
}

impl Category {
    /// Empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Category seeded with previously saved values.
    pub fn with_saved(name: impl Into<String>, saved: toml::Table) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            saved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create entry `key` with `default` as its default value.
    ///
    /// The current value is the saved value for `key` when one exists and
    /// converts to the default's type, otherwise `default`. Creating an
    /// existing entry replaces its default and keeps its current value.
    pub fn create_entry(&mut self, key: &str, default: Value) -> &mut Entry {
        if let Some(idx) = self.entries.iter().position(|e| e.key == key) {
            let entry = &mut self.entries[idx];
            entry.default_value = default;
            return entry;
        }

        let current_value = match self.saved.get(key).and_then(Value::from_toml) {
            Some(raw) => match coerce_like(raw, &default) {
                Some(value) => value,
                None => {
                    warn!(
                        "[{}] saved value for `{key}` does not fit {}, using default",
                        self.name,
                        default.type_name()
                    );
                    default.clone()
                }
            },
            None => default.clone(),
        };

        self.entries.push(Entry {
            key: key.to_string(),
            current_value,
            default_value: default,
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    /// Entries in creation order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Set every entry's current value back to its default.
    pub fn reset_to_defaults(&mut self) {
        for entry in &mut self.entries {
            entry.reset_to_default();
        }
    }

    /// Current values as a `[name]` table, ready to write out.
    ///
    /// Saved keys without an entry are carried over unchanged.
    pub fn to_document(&self) -> toml::Table {
        let mut values = self.saved.clone();
        for entry in &self.entries {
            values.insert(entry.key.clone(), entry.current_value.to_toml());
        }
        let mut doc = toml::Table::new();
        doc.insert(self.name.clone(), toml::Value::Table(values));
        doc
    }
}

/// Convert a raw saved value to the shape of `like`.
fn coerce_like(raw: Value, like: &Value) -> Option<Value> {
    match (raw, like) {
        (raw @ Value::String(_), Value::String(_))
        | (raw @ Value::Bool(_), Value::Bool(_))
        | (raw @ Value::Int(_), Value::Int(_))
        | (raw @ Value::Float(_), Value::Float(_))
        | (raw @ Value::Enum(_), Value::Enum(_)) => Some(raw),
        (Value::Int(i), Value::Float(_)) => Some(Value::Float(i as f32)),
        (Value::Float(f), Value::Int(_)) if f.fract() == 0.0 => {
            i32::try_from(f as i64).ok().map(Value::Int)
        }
        (Value::Int(i), Value::Enum(_)) => usize::try_from(i).ok().map(Value::Enum),
        _ => None,
    }
}
