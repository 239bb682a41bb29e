//! Immediate-mode [`Ui`] over a terminal.
//!
//! Widgets are declared anew every frame. Focusable widgets are numbered in
//! declaration order and the frame's key event is delivered to the one that
//! holds focus. The declared widgets become styled lines that the frame loop
//! draws with ratatui.
//!
//! # Keys
//!
//! - `Up`/`Down`, `Tab`/`BackTab`: move focus
//! - `Enter`: press a button; held (key repeat) it keeps a repeat button firing
//! - `Space`/`Enter`: flip a toggle
//! - `Left`/`Right`: step a toolbar, grid or slider (`Shift` for 10x slider steps)
//! - printable keys and `Backspace`: edit text; `Enter` starts a new line in a text area

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use modsettings::Ui;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

/// Width of a horizontal slider track, in cells.
const TRACK_WIDTH: usize = 24;
/// Height of a vertical slider track, in rows.
const TRACK_HEIGHT: usize = 5;
/// Layout pixels per blank terminal row.
const PIXELS_PER_ROW: u32 = 15;

/// Everything declared during one frame.
#[derive(Debug, Default, Clone)]
pub struct Screen {
    pub title: String,
    pub lines: Vec<Line<'static>>,
}

#[derive(Debug, Default)]
pub struct TermUi {
    focus: usize,
    focusable: usize,
    key: Option<KeyEvent>,
    title: String,
    lines: Vec<Line<'static>>,
    // unrounded position of the focused slider, so int sliders can creep
    // past the rounding of small steps
    drag: Option<f32>,
}

impl TermUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused widget.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Start a frame. Navigation keys move focus; any other key is held for
    /// the focused widget.
    pub fn begin_frame(&mut self, key: Option<KeyEvent>) {
        self.focusable = 0;
        self.lines.clear();
        self.key = None;

        let Some(key) = key else { return };
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.move_focus(self.focus.saturating_sub(1)),
            KeyCode::Down | KeyCode::Tab => self.move_focus(self.focus + 1),
            _ => self.key = Some(key),
        }
    }

    /// Finish the frame and hand over what was declared.
    pub fn end_frame(&mut self) -> Screen {
        if self.focus >= self.focusable {
            self.move_focus(self.focusable.saturating_sub(1));
        }
        self.key = None;
        Screen {
            title: self.title.clone(),
            lines: std::mem::take(&mut self.lines),
        }
    }

    fn move_focus(&mut self, focus: usize) {
        if focus != self.focus {
            self.focus = focus;
            self.drag = None;
        }
    }

    /// Number the next focusable widget, returning whether it has focus.
    fn next_widget(&mut self) -> bool {
        let focused = self.focusable == self.focus;
        self.focusable += 1;
        focused
    }

    /// The frame's key, if `focused` and `accept` wants it.
    fn take_key(&mut self, focused: bool, accept: impl Fn(&KeyEvent) -> bool) -> Option<KeyEvent> {
        if !focused {
            return None;
        }
        self.key.take_if(|key| accept(key))
    }

    fn push(&mut self, focused: bool, spans: Vec<Span<'static>>) {
        let marker = if focused { "> ".bold() } else { Span::raw("  ") };
        let mut line = Line::from(spans);
        line.spans.insert(0, marker);
        self.lines.push(line);
    }

    fn edit(&mut self, focused: bool, value: &str, multiline: bool) -> String {
        let mut text = value.to_string();
        let key = self.take_key(focused, |k| {
            !k.modifiers.contains(KeyModifiers::CONTROL)
                && match k.code {
                    KeyCode::Char(_) | KeyCode::Backspace => true,
                    KeyCode::Enter => multiline && k.kind == KeyEventKind::Press,
                    _ => false,
                }
        });
        match key.map(|k| k.code) {
            Some(KeyCode::Char(c)) => text.push(c),
            Some(KeyCode::Backspace) => {
                text.pop();
            }
            Some(KeyCode::Enter) => text.push('\n'),
            _ => {}
        }
        text
    }

    fn choose(&mut self, focused: bool, selected: Option<usize>, count: usize) -> Option<usize> {
        let Some(last) = count.checked_sub(1) else {
            return selected;
        };
        let key = self.take_key(focused, |k| matches!(k.code, KeyCode::Left | KeyCode::Right));
        match (key.map(|k| k.code), selected) {
            (Some(KeyCode::Left), Some(i)) => Some(i.saturating_sub(1)),
            (Some(KeyCode::Right), Some(i)) => Some((i + 1).min(last)),
            // nothing selected yet: enter from the matching end
            (Some(KeyCode::Left), None) => Some(last),
            (Some(KeyCode::Right), None) => Some(0),
            _ => selected,
        }
    }

    fn slide(&mut self, focused: bool, value: f32, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo.is_nan() || hi.is_nan() {
            return value;
        }
        let Some(key) = self.take_key(focused, |k| matches!(k.code, KeyCode::Left | KeyCode::Right))
        else {
            return value;
        };

        let base = match self.drag {
            Some(pos) if resumes(pos, value) => pos,
            _ => value,
        };
        let mut step = slider_step(lo, hi);
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            step *= 10.0;
        }
        let next = match key.code {
            KeyCode::Left => base - step,
            _ => base + step,
        }
        .clamp(lo, hi);
        self.drag = Some(next);
        next
    }
}

/// Slider step: 1% of the range, or 1.0 once the range reaches 100.
pub fn slider_step(min: f32, max: f32) -> f32 {
    let range = (max - min).abs();
    if range >= 100.0 { 1.0 } else { range / 100.0 }
}

// The host either kept the dragged position or rounded it to an int.
fn resumes(pos: f32, value: f32) -> bool {
    pos == value || (value.fract() == 0.0 && pos.round() == value)
}

fn number(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn knob(value: f32, lo: f32, hi: f32, cells: usize) -> usize {
    let frac = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (frac * (cells - 1) as f32).round() as usize
}

fn option_spans(selected: Option<usize>, options: &[String]) -> Vec<Span<'static>> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if selected == Some(i) {
                format!(" {option} ").reversed()
            } else {
                Span::raw(format!(" {option} "))
            }
        })
        .collect()
}

impl Ui for TermUi {
    fn panel(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.move_focus(0);
        }
    }

    fn label(&mut self, text: &str) {
        for line in text.lines() {
            self.push(false, vec![Span::raw(line.to_string())]);
        }
    }

    fn button(&mut self, text: &str) -> bool {
        let focused = self.next_widget();
        let pressed = self
            .take_key(focused, |k| k.code == KeyCode::Enter && k.kind == KeyEventKind::Press)
            .is_some();
        self.push(focused, vec![format!("[ {text} ]").bold()]);
        pressed
    }

    fn repeat_button(&mut self, text: &str) -> bool {
        let focused = self.next_widget();
        let pressed = self.take_key(focused, |k| k.code == KeyCode::Enter).is_some();
        self.push(
            focused,
            vec![format!("[ {text} ]").bold(), " (hold)".dim()],
        );
        pressed
    }

    fn text_field(&mut self, value: &str) -> String {
        let focused = self.next_widget();
        let text = self.edit(focused, value, false);
        let cursor = if focused { "_" } else { "" };
        self.push(focused, vec![format!("{text}{cursor}").underlined()]);
        text
    }

    fn text_area(&mut self, value: &str) -> String {
        let focused = self.next_widget();
        let text = self.edit(focused, value, true);
        let cursor = if focused { "_" } else { "" };
        let shown = format!("{text}{cursor}");
        for (i, row) in shown.split('\n').enumerate() {
            let span = Span::styled(format!("| {row}"), Style::new().underlined());
            self.push(focused && i == 0, vec![span]);
        }
        text
    }

    fn toggle(&mut self, value: bool, label: &str) -> bool {
        let focused = self.next_widget();
        let flipped = self
            .take_key(focused, |k| {
                k.kind == KeyEventKind::Press
                    && matches!(k.code, KeyCode::Enter | KeyCode::Char(' '))
            })
            .is_some();
        let value = value != flipped;
        let check = if value { "[x] " } else { "[ ] " };
        self.push(focused, vec![Span::raw(check), Span::raw(label.to_string())]);
        value
    }

    fn toolbar(&mut self, selected: Option<usize>, options: &[String]) -> Option<usize> {
        let focused = self.next_widget();
        let selected = self.choose(focused, selected, options.len());
        self.push(focused, option_spans(selected, options));
        selected
    }

    fn selection_grid(
        &mut self,
        selected: Option<usize>,
        options: &[String],
        columns: usize,
    ) -> Option<usize> {
        let focused = self.next_widget();
        let selected = self.choose(focused, selected, options.len());
        let columns = columns.max(1);
        for (row, chunk) in options.chunks(columns).enumerate() {
            let offset = row * columns;
            let spans = option_spans(selected.and_then(|s| s.checked_sub(offset)), chunk);
            self.push(focused && row == 0, spans);
        }
        selected
    }

    fn horizontal_slider(&mut self, value: f32, min: f32, max: f32) -> f32 {
        let focused = self.next_widget();
        let value = self.slide(focused, value, min, max);
        let (lo, hi) = (min.min(max), min.max(max));
        let at = knob(value, lo, hi, TRACK_WIDTH);
        let track: String = (0..TRACK_WIDTH)
            .map(|i| if i == at { '●' } else { '─' })
            .collect();
        self.push(
            focused,
            vec![
                Span::raw(format!("{} ", number(lo))),
                track.cyan(),
                Span::raw(format!(" {}  ", number(hi))),
                number(value).bold(),
            ],
        );
        value
    }

    fn vertical_slider(&mut self, value: f32, min: f32, max: f32) -> f32 {
        let focused = self.next_widget();
        let value = self.slide(focused, value, min, max);
        let (lo, hi) = (min.min(max), min.max(max));
        let at = TRACK_HEIGHT - 1 - knob(value, lo, hi, TRACK_HEIGHT);
        for row in 0..TRACK_HEIGHT {
            let cell = if row == at { "●" } else { "│" };
            let mut spans = vec![cell.cyan()];
            if row == 0 {
                spans.push(Span::raw(format!(" {}", number(hi))));
            } else if row == at {
                spans.push(format!(" {}", number(value)).bold());
            } else if row == TRACK_HEIGHT - 1 {
                spans.push(Span::raw(format!(" {}", number(lo))));
            }
            self.push(focused && row == 0, spans);
        }
        value
    }

    fn space(&mut self, pixels: u32) {
        for _ in 0..(pixels / PIXELS_PER_ROW).max(1) {
            self.lines.push(Line::default());
        }
    }
}
