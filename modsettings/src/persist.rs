//! Persistence controller.
//!
//! Four operations keep a page's value-bearing controls and its preference
//! category in step. Each walks the controls in registration order and
//! keys entries by accessor name.
//!
//! | Operation | Effect |
//! |---|---|
//! | [`create_defaults`] | live values become the entries' defaults |
//! | [`load`] | entries' current values are written into the host |
//! | [`save`] | live values become the entries' current values |
//! | [`reset`] | current values return to defaults, then [`load`] |

use std::path::Path;

use crate::{
    data::{Page, Value, accessor::lock_host},
    error::{Error, Result},
    store::{Category, PreferenceStore},
};

/// Create the page's category at `path` and one entry per value-bearing
/// control, defaulting to the control's current live value.
///
/// Values saved at `path` by an earlier run become the entries' current
/// values; they reach the host on the following [`load`].
pub fn create_defaults<S>(page: &Page, store: &mut S, path: &Path) -> Result<()>
where
    S: PreferenceStore + ?Sized,
{
    let defaults = read_live(page)?;
    let category = store.create_category(page.name(), path)?;
    for (key, value) in defaults {
        category.create_entry(&key, value);
    }
    debug!(
        "[{}] created {} entries at {}",
        page.name(),
        category.entries().len(),
        path.display()
    );
    Ok(())
}

/// Write each entry's current value into the host.
///
/// Controls without an entry keep their live value, as do entries whose
/// value no longer fits the accessor.
pub fn load<S>(page: &Page, store: &S) -> Result<()>
where
    S: PreferenceStore + ?Sized,
{
    let category = category(page, store)?;
    let mut host = lock_host(page.host());

    for accessor in page.controls().iter().filter_map(|c| c.value_accessor()) {
        let Some(entry) = category.entry(accessor.name()) else {
            debug!("[{}] no entry for `{}`, keeping live value", page.name(), accessor.name());
            continue;
        };
        let Some(value) = entry.current_value().clone().coerce(accessor.kind()) else {
            warn!(
                "[{}] entry `{}` holds {}, expected {}",
                page.name(),
                accessor.name(),
                entry.current_value().type_name(),
                accessor.kind()
            );
            continue;
        };
        match accessor.set(&mut *host, value) {
            Ok(()) => {}
            Err(Error::TypeMismatch { .. }) => {
                warn!("[{}] entry `{}` rejected by host", page.name(), accessor.name());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Copy the host's live values into the entries' current values and
/// persist the category. Defaults are untouched.
pub fn save<S>(page: &Page, store: &mut S) -> Result<()>
where
    S: PreferenceStore + ?Sized,
{
    let values = read_live(page)?;
    let category = category_mut(page, store)?;
    for (key, value) in values {
        match category.entry_mut(&key) {
            Some(entry) => entry.set_current_value(value),
            None => warn!("[{}] no entry for `{key}`, not saved", page.name()),
        }
    }
    store.save_category(page.name())
}

/// Restore every entry to its default and load the result into the host.
pub fn reset<S>(page: &Page, store: &mut S) -> Result<()>
where
    S: PreferenceStore + ?Sized,
{
    category_mut(page, store)?.reset_to_defaults();
    info!("[{}] reset to defaults", page.name());
    load(page, &*store)
}

/// Live values of the page's value-bearing controls, read under one lock.
fn read_live(page: &Page) -> Result<Vec<(String, Value)>> {
    let host = lock_host(page.host());
    page.controls()
        .iter()
        .filter_map(|c| c.value_accessor())
        .map(|accessor| Ok((accessor.name().to_string(), accessor.get(&*host)?)))
        .collect()
}

fn category<'a, S>(page: &Page, store: &'a S) -> Result<&'a Category>
where
    S: PreferenceStore + ?Sized,
{
    store.category(page.name()).ok_or_else(|| Error::MissingCategory {
        page: page.name().to_string(),
    })
}

fn category_mut<'a, S>(page: &Page, store: &'a mut S) -> Result<&'a mut Category>
where
    S: PreferenceStore + ?Sized,
{
    store
        .category_mut(page.name())
        .ok_or_else(|| Error::MissingCategory {
            page: page.name().to_string(),
        })
}
