//! Frame loop.
//!
//! Each frame polls for at most one key event. The toggle key and quit keys
//! are handled here; every other key goes to the focused widget.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use modsettings::{Menu, PreferenceStore, Settings};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::{
    app_config::AppConfig,
    demo::Demo,
    term_ui::{Screen, TermUi},
};

const MENU_KEYS: &str = "Up/Down focus  Left/Right adjust  Enter press  Space toggle";

/// Where a key event goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleMenu,
    Quit,
    Widget(KeyEvent),
}

/// Route `key`: the toggle key always flips the menu, `Ctrl+C` always quits,
/// `q` quits only while the menu is hidden.
pub fn route(key: KeyEvent, toggle: KeyCode, menu_visible: bool) -> Command {
    if key.code == toggle {
        return Command::ToggleMenu;
    }
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || (!menu_visible && matches!(key.code, KeyCode::Char('q' | 'Q'))) {
        return Command::Quit;
    }
    Command::Widget(key)
}

pub struct App<S: PreferenceStore> {
    settings: Settings<S>,
    menu: Menu,
    ui: TermUi,
    demo: Demo,
    toggle: KeyCode,
    toggle_name: String,
    hint: String,
    quit: bool,
}

impl<S: PreferenceStore> App<S> {
    pub fn new(settings: Settings<S>, config: &AppConfig, demo: Demo) -> anyhow::Result<Self> {
        Ok(Self {
            settings,
            menu: Menu::new(),
            ui: TermUi::new(),
            demo,
            toggle: config.toggle_key()?,
            toggle_name: config.toggle_key.clone(),
            hint: config.hint(),
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Give back the settings, e.g. to save them on exit.
    pub fn into_settings(self) -> Settings<S> {
        self.settings
    }

    /// Advance one frame with this frame's key event, if any.
    pub fn tick(&mut self, key: Option<KeyEvent>) -> anyhow::Result<Screen> {
        let mut widget_key = None;
        match key.map(|k| route(k, self.toggle, self.menu.is_visible())) {
            Some(Command::ToggleMenu) => self.menu.toggle_visibility(),
            Some(Command::Quit) => {
                info!("Quit requested");
                self.quit = true;
            }
            Some(Command::Widget(k)) => widget_key = Some(k),
            None => {}
        }

        self.ui.begin_frame(widget_key);
        self.menu.draw(&mut self.ui, &mut self.settings)?;
        Ok(self.ui.end_frame())
    }

    /// Run frames until a quit key is pressed.
    pub fn run(&mut self, terminal: &mut DefaultTerminal, tick_rate: Duration) -> anyhow::Result<()> {
        while !self.quit {
            let key = if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
                    _ => None,
                }
            } else {
                None
            };
            let screen = self.tick(key)?;
            terminal.draw(|frame| self.draw(frame, &screen))?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame, screen: &Screen) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        if self.menu.is_visible() {
            let block = Block::bordered().title(screen.title.clone().bold());
            frame.render_widget(Paragraph::new(screen.lines.clone()).block(block), body);
            let keys = format!("{MENU_KEYS}  {} close", self.toggle_name);
            frame.render_widget(Paragraph::new(keys.dim()), footer);
        } else {
            let mut lines: Vec<Line> = self.demo.status().into_iter().map(Line::from).collect();
            lines.push(Line::default());
            lines.push(Line::from(self.hint.clone().yellow()));
            let block = Block::bordered().title("modsettings".bold());
            frame.render_widget(Paragraph::new(lines).block(block), body);
            frame.render_widget(Paragraph::new("q quit".dim()), footer);
        }
    }
}
