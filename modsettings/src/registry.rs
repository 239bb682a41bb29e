//! Page registry.
//!
//! Pages are appended while the registry is open. [`Registry::finalize`]
//! sorts them by name and freezes the list; after that the page set never
//! changes. A process-wide instance backs [`register_page`] for host modules
//! that register from their own startup code.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    data::{Control, Host, Page},
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Frozen,
}

/// Ordered collection of pages with a two-phase lifecycle.
#[derive(Debug)]
pub struct Registry {
    phase: Phase,
    pages: Vec<Page>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Open,
            pages: Vec::new(),
        }
    }

    /// Append a page with the reset button enabled.
    pub fn register_page(
        &mut self,
        name: impl Into<String>,
        host: Host,
        controls: Vec<Control>,
    ) -> Result<()> {
        self.register_page_with_reset(name, host, controls, true)
    }

    /// Append a page.
    ///
    /// # Errors
    ///
    /// [`Error::RegistryFrozen`] after [`finalize`](Registry::finalize);
    /// [`Error::DuplicateAccessor`] when two value-bearing controls share an
    /// accessor name. The registry is unchanged on error.
    pub fn register_page_with_reset(
        &mut self,
        name: impl Into<String>,
        host: Host,
        controls: Vec<Control>,
        reset_enabled: bool,
    ) -> Result<()> {
        let name = name.into();
        if self.phase == Phase::Frozen {
            return Err(Error::RegistryFrozen { page: name });
        }
        let page = Page::new(name, host, controls, reset_enabled)?;
        info!(
            "Registered page `{}` with {} controls",
            page.name(),
            page.controls().len()
        );
        self.pages.push(page);
        Ok(())
    }

    /// Sort pages by name (ordinal, stable) and freeze the registry.
    ///
    /// # Errors
    ///
    /// [`Error::RegistryFrozen`] if already finalized.
    pub fn finalize(&mut self) -> Result<()> {
        if self.phase == Phase::Frozen {
            return Err(Error::RegistryFrozen {
                page: String::new(),
            });
        }
        self.pages.sort_by(|a, b| a.name().cmp(b.name()));
        self.phase = Phase::Frozen;
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.phase == Phase::Frozen
    }

    /// Pages in their current order (sorted once frozen).
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

static GLOBAL: Mutex<Registry> = Mutex::new(Registry::new());

/// Lock the process-wide registry.
pub fn global() -> MutexGuard<'static, Registry> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register a page in the process-wide registry, reset button enabled.
pub fn register_page(name: impl Into<String>, host: Host, controls: Vec<Control>) -> Result<()> {
    global().register_page(name, host, controls)
}

/// Register a page in the process-wide registry.
pub fn register_page_with_reset(
    name: impl Into<String>,
    host: Host,
    controls: Vec<Control>,
    reset_enabled: bool,
) -> Result<()> {
    global().register_page_with_reset(name, host, controls, reset_enabled)
}
