//! Settings menu.
//!
//! While visible, the menu shows either the list of pages or the one page
//! that is open. Hiding it closes the open page.

use crate::{error::Result, settings::Settings, store::PreferenceStore, ui::Ui};

/// Title of the page list panel.
pub const MENU_TITLE: &str = "Mod Settings";
/// Text of the button returning to the page list.
pub const BACK_TEXT: &str = "Back";
/// Text of the per-page reset button.
pub const RESET_TEXT: &str = "Reset default settings";
/// Gap above the reset button.
pub const RESET_SPACING: u32 = 30;

/// Visibility and navigation state of the settings menu.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Menu {
    visible: bool,
    open: Option<usize>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the menu.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        debug!("settings menu {}", if self.visible { "shown" } else { "hidden" });
    }

    /// Index of the open page, if any.
    pub fn open_page(&self) -> Option<usize> {
        self.open
    }

    /// Draw one tick of the menu.
    pub fn draw<S, U>(&mut self, ui: &mut U, settings: &mut Settings<S>) -> Result<()>
    where
        S: PreferenceStore,
        U: Ui + ?Sized,
    {
        if !self.visible {
            self.open = None;
            return Ok(());
        }

        let Some(index) = self.open else {
            ui.panel(MENU_TITLE);
            for (i, page) in settings.pages().iter().enumerate() {
                if ui.button(page.formatted_name()) {
                    self.open = Some(i);
                }
            }
            return Ok(());
        };

        let page = settings.page(index)?;
        let reset_enabled = page.reset_enabled();
        ui.panel(page.formatted_name());
        if ui.button(BACK_TEXT) {
            self.open = None;
        }
        settings.render_page(ui, index)?;

        if reset_enabled {
            ui.space(RESET_SPACING);
            if ui.button(RESET_TEXT) {
                settings.reset(index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        Config, Control, field, registry::Registry, render::tests::ScriptedUi, store::MemoryStore,
    };

    struct Radio {
        volume: i32,
    }

    fn settings(radio: &Arc<Mutex<Radio>>, reset_enabled: bool) -> Settings<MemoryStore> {
        let mut registry = Registry::new();
        registry
            .register_page_with_reset(
                "CarRadio",
                radio.clone(),
                vec![Control::horizontal_slider(field!(Radio, volume), 0.0, 11.0).unwrap()],
                reset_enabled,
            )
            .unwrap();
        registry.register_page("Clock", Arc::new(Mutex::new(())), vec![]).unwrap();
        Settings::startup(registry, MemoryStore::new(), Config::default()).unwrap()
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let radio = Arc::new(Mutex::new(Radio { volume: 4 }));
        let mut settings = settings(&radio, true);
        let mut menu = Menu::new();
        let mut ui = ScriptedUi::default();
        menu.draw(&mut ui, &mut settings).unwrap();
        assert!(ui.calls.is_empty());
    }

    #[test]
    fn test_navigation() {
        let radio = Arc::new(Mutex::new(Radio { volume: 4 }));
        let mut settings = settings(&radio, true);
        let mut menu = Menu::new();
        menu.toggle_visibility();

        let mut ui = ScriptedUi::default();
        ui.press("Car Radio");
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(ui.calls, ["panel Mod Settings", "button Car Radio", "button Clock"]);
        assert_eq!(menu.open_page(), Some(0));

        let mut ui = ScriptedUi::default();
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(
            ui.calls,
            [
                "panel Car Radio",
                "button Back",
                "hslider 4 [0, 11]",
                "space 30",
                "button Reset default settings"
            ]
        );

        let mut ui = ScriptedUi::default();
        ui.press(BACK_TEXT);
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(menu.open_page(), None);
    }

    #[test]
    fn test_hiding_closes_page() {
        let radio = Arc::new(Mutex::new(Radio { volume: 4 }));
        let mut settings = settings(&radio, true);
        let mut menu = Menu::new();
        menu.toggle_visibility();
        let mut ui = ScriptedUi::default();
        ui.press("Clock");
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(menu.open_page(), Some(1));

        menu.toggle_visibility();
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(menu.open_page(), None);
        menu.toggle_visibility();
        assert_eq!(menu.open_page(), None);
    }

    #[test]
    fn test_reset_button() {
        let radio = Arc::new(Mutex::new(Radio { volume: 4 }));
        let mut settings = settings(&radio, true);
        let mut menu = Menu::new();
        menu.toggle_visibility();
        let mut ui = ScriptedUi::default();
        ui.press("Car Radio");
        menu.draw(&mut ui, &mut settings).unwrap();

        let mut ui = ScriptedUi::default();
        ui.slides.push_back(9.7);
        ui.press(RESET_TEXT);
        menu.draw(&mut ui, &mut settings).unwrap();
        assert_eq!(radio.lock().unwrap().volume, 4);
    }

    #[test]
    fn test_reset_hidden_when_disabled() {
        let radio = Arc::new(Mutex::new(Radio { volume: 4 }));
        let mut settings = settings(&radio, false);
        let mut menu = Menu::new();
        menu.toggle_visibility();
        let mut ui = ScriptedUi::default();
        ui.press("Car Radio");
        menu.draw(&mut ui, &mut settings).unwrap();

        let mut ui = ScriptedUi::default();
        menu.draw(&mut ui, &mut settings).unwrap();
        assert!(!ui.calls.iter().any(|c| c.contains(RESET_TEXT)));
    }
}
