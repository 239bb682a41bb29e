use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    store::{Category, PreferenceStore},
};

/// Store writing each category to its own TOML file.
///
/// A file that fails to parse is moved aside to `<file>.bak` and its
/// category starts empty.
///
/// ```toml
/// [PlayerTweaks]
/// speed = 7.5
/// mode = 2
/// ```
#[derive(Debug, Default)]
pub struct FileStore {
    categories: HashMap<String, (PathBuf, Category)>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File backing category `name`, if created.
    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.categories.get(name).map(|(path, _)| path.as_path())
    }

    fn read_saved_or_back_up(name: &str, path: &Path) -> Result<toml::Table> {
        match Self::read_saved(name, path) {
            Err(Error::Parse { source, .. }) => {
                let backup = backup_path(path);
                fs::rename(path, &backup).map_err(|source| Error::Io {
                    path: backup.clone(),
                    source,
                })?;
                warn!(
                    "{}: {source}; moved to {}, `{name}` starts empty",
                    path.display(),
                    backup.display()
                );
                Ok(toml::Table::new())
            }
            other => other,
        }
    }

    fn read_saved(name: &str, path: &Path) -> Result<toml::Table> {
        if !path.exists() {
            debug!("no saved preferences for `{name}` at {}", path.display());
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut doc: toml::Table = toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match doc.remove(name) {
            Some(toml::Value::Table(values)) => Ok(values),
            Some(_) => {
                warn!("{}: `{name}` is not a table, ignoring", path.display());
                Ok(toml::Table::new())
            }
            None => Ok(toml::Table::new()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn create_category(&mut self, name: &str, path: &Path) -> Result<&mut Category> {
        if !self.categories.contains_key(name) {
            let saved = Self::read_saved_or_back_up(name, path)?;
            self.categories.insert(
                name.to_string(),
                (path.to_path_buf(), Category::with_saved(name, saved)),
            );
        }
        let (_, category) = self
            .categories
            .get_mut(name)
            .ok_or_else(|| Error::MissingCategory {
                page: name.to_string(),
            })?;
        Ok(category)
    }

    fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name).map(|(_, category)| category)
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.get_mut(name).map(|(_, category)| category)
    }

    fn save_category(&mut self, name: &str) -> Result<()> {
        let (path, category) = self
            .categories
            .get(name)
            .ok_or_else(|| Error::MissingCategory {
                page: name.to_string(),
            })?;

        let content = toml::to_string_pretty(&category.to_document())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!("saved `{name}` to {}", path.display());
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    PathBuf::from(backup)
}
