use std::{collections::HashMap, path::Path};

use crate::{
    error::{Error, Result},
    store::{Category, PreferenceStore},
};

/// Store keeping categories in memory only.
///
/// Saving snapshots a category's current values; a category created again
/// on a fresh store built with [`MemoryStore::with_saved`] sees them, which
/// is enough to exercise a restart without touching the file system.
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: HashMap<String, Category>,
    saved: HashMap<String, toml::Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh store seeded with the snapshots saved by `previous`.
    pub fn with_saved(previous: &MemoryStore) -> Self {
        Self {
            categories: HashMap::new(),
            saved: previous.saved.clone(),
        }
    }

    /// Last saved snapshot of category `name`.
    pub fn saved(&self, name: &str) -> Option<&toml::Table> {
        self.saved.get(name)
    }
}

impl PreferenceStore for MemoryStore {
    fn create_category(&mut self, name: &str, _path: &Path) -> Result<&mut Category> {
        let saved = self.saved.get(name).cloned().unwrap_or_default();
        Ok(self
            .categories
            .entry(name.to_string())
            .or_insert_with(|| Category::with_saved(name, saved)))
    }

    fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.get_mut(name)
    }

    fn save_category(&mut self, name: &str) -> Result<()> {
        let category = self
            .categories
            .get(name)
            .ok_or_else(|| Error::MissingCategory {
                page: name.to_string(),
            })?;
        let mut doc = category.to_document();
        if let Some(toml::Value::Table(values)) = doc.remove(name) {
            self.saved.insert(name.to_string(), values);
        }
        Ok(())
    }
}
