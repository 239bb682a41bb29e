//! Immediate-mode GUI primitives.
//!
//! The engine draws through this trait and never retains widgets: every
//! tick it declares the full control list again, passing each widget its
//! current value and taking back the value after this tick's interaction.

/// Widget primitives of the host GUI.
pub trait Ui {
    /// Background panel with a title, opened at the start of a screen.
    fn panel(&mut self, title: &str);

    fn label(&mut self, text: &str);

    /// `true` once per discrete press.
    fn button(&mut self, text: &str) -> bool;

    /// `true` on every tick the button is held.
    fn repeat_button(&mut self, text: &str) -> bool;

    /// Single-line editable text; returns the possibly edited text.
    fn text_field(&mut self, value: &str) -> String;

    /// Multi-line editable text; returns the possibly edited text.
    fn text_area(&mut self, value: &str) -> String;

    fn toggle(&mut self, value: bool, label: &str) -> bool;

    /// Single-select strip; returns the selected index.
    ///
    /// `None` means no option is selected, e.g. an int outside the option
    /// range. Returning `None` leaves the bound value untouched.
    fn toolbar(&mut self, selected: Option<usize>, options: &[String]) -> Option<usize>;

    /// Single-select grid of `columns` columns; like [`toolbar`](Ui::toolbar).
    fn selection_grid(
        &mut self,
        selected: Option<usize>,
        options: &[String],
        columns: usize,
    ) -> Option<usize>;

    fn horizontal_slider(&mut self, value: f32, min: f32, max: f32) -> f32;

    fn vertical_slider(&mut self, value: f32, min: f32, max: f32) -> f32;

    /// Layout gap.
    fn space(&mut self, pixels: u32);
}
