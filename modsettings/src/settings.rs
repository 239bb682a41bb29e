//! Engine facade.
//!
//! [`Settings`] owns the finalized page list together with the preference
//! store, and runs the startup and shutdown sequences:
//!
//! - startup: finalize the registry, then create defaults and load, for
//!   every page in registry order; a page that fails is logged and skipped
//! - shutdown: save every page in registry order

use crate::{
    config::Config,
    data::Page,
    error::{Error, Result},
    persist,
    registry::{self, Registry},
    render,
    store::PreferenceStore,
    ui::Ui,
};

/// Finalized pages bound to a preference store.
#[derive(Debug)]
pub struct Settings<S: PreferenceStore> {
    pages: Vec<Page>,
    store: S,
    config: Config,
}

impl<S: PreferenceStore> Settings<S> {
    /// Finalize `registry` (unless already frozen) and run create-defaults
    /// and load for every page.
    ///
    /// A page whose preferences cannot be read keeps its live values; the
    /// other pages start normally.
    pub fn startup(mut registry: Registry, store: S, config: Config) -> Result<Self> {
        if !registry.is_frozen() {
            registry.finalize()?;
        }
        Self::start(registry.pages().to_vec(), store, config)
    }

    /// [`startup`](Settings::startup) against the process-wide registry.
    ///
    /// The global registry stays frozen afterwards; later registrations fail.
    pub fn startup_global(store: S, config: Config) -> Result<Self> {
        let pages = {
            let mut registry = registry::global();
            if !registry.is_frozen() {
                registry.finalize()?;
            }
            registry.pages().to_vec()
        };
        Self::start(pages, store, config)
    }

    fn start(pages: Vec<Page>, store: S, config: Config) -> Result<Self> {
        let mut settings = Self {
            pages,
            store,
            config,
        };
        for index in 0..settings.pages.len() {
            let started = settings
                .create_defaults(index)
                .and_then(|()| settings.load(index));
            if let Err(e) = started {
                error!("failed to start `{}`: {e}", settings.pages[index].name());
            }
        }

        if settings.pages.is_empty() {
            info!("No pages registered");
        } else {
            let names: Vec<&str> = settings.pages.iter().map(Page::name).collect();
            info!("Registered pages: {}", names.join(", "));
        }
        Ok(settings)
    }

    /// Save every page. All pages are attempted; the first error is returned.
    pub fn shutdown(&mut self) -> Result<()> {
        let mut first_err = None;
        for index in 0..self.pages.len() {
            if let Err(e) = self.save(index) {
                error!("failed to save `{}`: {e}", self.pages[index].name());
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Pages in registry order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Result<&Page> {
        self.pages.get(index).ok_or(Error::UnknownPage { index })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create the page's category at its canonical path.
    pub fn create_defaults(&mut self, index: usize) -> Result<()> {
        let page = self.pages.get(index).ok_or(Error::UnknownPage { index })?;
        let path = self.config.category_path(page.name());
        persist::create_defaults(page, &mut self.store, &path)
    }

    pub fn load(&self, index: usize) -> Result<()> {
        persist::load(self.page(index)?, &self.store)
    }

    pub fn save(&mut self, index: usize) -> Result<()> {
        let page = self.pages.get(index).ok_or(Error::UnknownPage { index })?;
        persist::save(page, &mut self.store)
    }

    /// Restore the page's defaults into its host.
    pub fn reset(&mut self, index: usize) -> Result<()> {
        let page = self.pages.get(index).ok_or(Error::UnknownPage { index })?;
        persist::reset(page, &mut self.store)
    }

    /// Draw the page's controls for this tick.
    pub fn render_page<U: Ui + ?Sized>(&self, ui: &mut U, index: usize) -> Result<()> {
        render::render_page(ui, self.page(index)?)
    }
}
