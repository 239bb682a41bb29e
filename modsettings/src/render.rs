//! Rendering dispatcher.
//!
//! Maps each control of the displayed page to one [`Ui`] call per tick and
//! writes the widget's result back through the control's accessor. Value
//! controls write back every tick, edited or not, except choices with no
//! selection.

use crate::{
    data::{
        Accessor, Control, HostObject, Page, Value, ValueKind,
        accessor::lock_host,
        control::{Choice, LabelText, Slider},
    },
    error::{Error, Result},
    ui::Ui,
};

/// Draw every control of `page`, holding the host lock for the whole tick.
pub fn render_page<U: Ui + ?Sized>(ui: &mut U, page: &Page) -> Result<()> {
    let mut host = lock_host(page.host());
    for control in page.controls() {
        render_control(ui, &mut *host, control)?;
    }
    Ok(())
}

/// Draw one control against `host` and apply the result.
pub fn render_control<U: Ui + ?Sized>(
    ui: &mut U,
    host: &mut HostObject,
    control: &Control,
) -> Result<()> {
    match control {
        Control::Label(label) => match label.text() {
            LabelText::Static(text) => ui.label(text),
            LabelText::Dynamic(accessor) => ui.label(&accessor.get(host)?.to_string()),
        },
        Control::Button(button) => {
            if ui.button(button.text()) {
                button.action().invoke(host, button.args())?;
            }
        }
        Control::RepeatButton(button) => {
            if ui.repeat_button(button.text()) {
                button.action().invoke(host, button.args())?;
            }
        }
        Control::TextField(input) => {
            let accessor = input.accessor();
            let edited = ui.text_field(&read_string(accessor, host)?);
            accessor.set(host, Value::String(edited))?;
        }
        Control::TextArea(input) => {
            let accessor = input.accessor();
            let edited = ui.text_area(&read_string(accessor, host)?);
            accessor.set(host, Value::String(edited))?;
        }
        Control::Toggle(toggle) => {
            let accessor = toggle.accessor();
            let current = match accessor.get(host)? {
                Value::Bool(b) => b,
                other => return Err(unexpected(accessor, &other)),
            };
            let value = ui.toggle(current, toggle.label());
            accessor.set(host, Value::Bool(value))?;
        }
        Control::Toolbar(choice) => {
            let selected = read_ordinal(choice, host)?;
            let picked = ui.toolbar(selected, choice.options());
            write_ordinal(choice, host, picked)?;
        }
        Control::SelectionGrid(choice) => {
            let selected = read_ordinal(choice, host)?;
            let picked = ui.selection_grid(selected, choice.options(), choice.columns());
            write_ordinal(choice, host, picked)?;
        }
        Control::HorizontalSlider(slider) => {
            let (value, min, max) = read_slider(slider, host)?;
            let raw = ui.horizontal_slider(value, min, max);
            write_slider(slider, host, raw)?;
        }
        Control::VerticalSlider(slider) => {
            let (value, min, max) = read_slider(slider, host)?;
            let raw = ui.vertical_slider(value, min, max);
            write_slider(slider, host, raw)?;
        }
        Control::Spacing(pixels) => ui.space(*pixels),
    }
    Ok(())
}

fn read_string(accessor: &Accessor, host: &HostObject) -> Result<String> {
    match accessor.get(host)? {
        Value::String(s) => Ok(s),
        other => Err(unexpected(accessor, &other)),
    }
}

/// Selected option, `None` when the value matches none of them.
fn read_ordinal(choice: &Choice, host: &HostObject) -> Result<Option<usize>> {
    let ordinal = match choice.accessor().get(host)? {
        Value::Int(i) => usize::try_from(i).ok(),
        Value::Enum(ordinal) => Some(ordinal),
        other => return Err(unexpected(choice.accessor(), &other)),
    };
    Ok(ordinal.filter(|ordinal| *ordinal < choice.options().len()))
}

fn write_ordinal(choice: &Choice, host: &mut HostObject, picked: Option<usize>) -> Result<()> {
    let Some(ordinal) = picked else {
        return Ok(());
    };
    let accessor = choice.accessor();
    let value = match accessor.kind() {
        ValueKind::Enum { .. } => Value::Enum(ordinal),
        _ => Value::Int(i32::try_from(ordinal).unwrap_or(i32::MAX)),
    };
    accessor.set(host, value)
}

/// Current value and freshly resolved bounds.
fn read_slider(slider: &Slider, host: &HostObject) -> Result<(f32, f32, f32)> {
    let min = slider.min().resolve(host)?;
    let max = slider.max().resolve(host)?;
    let value = slider.accessor().get(host)?;
    let value = value
        .as_f32()
        .ok_or_else(|| unexpected(slider.accessor(), &value))?;
    Ok((value, min, max))
}

fn write_slider(slider: &Slider, host: &mut HostObject, raw: f32) -> Result<()> {
    let value = if slider.is_int() {
        Value::Int(raw.round() as i32)
    } else {
        Value::Float(raw)
    };
    slider.accessor().set(host, value)
}

fn unexpected(accessor: &Accessor, value: &Value) -> Error {
    Error::type_mismatch(accessor.name(), accessor.kind(), value.type_name())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::{Action, Enumeration, enum_field, field, method};

    /// A scripted immediate-mode UI: records every call and answers from
    /// queued responses, echoing the input value when none is queued.
    #[derive(Default)]
    pub(crate) struct ScriptedUi {
        pub calls: Vec<String>,
        pub presses: VecDeque<String>,
        pub texts: VecDeque<String>,
        pub flags: VecDeque<bool>,
        pub picks: VecDeque<usize>,
        pub slides: VecDeque<f32>,
    }

    impl Ui for ScriptedUi {
        fn panel(&mut self, title: &str) {
            self.calls.push(format!("panel {title}"));
        }

        fn label(&mut self, text: &str) {
            self.calls.push(format!("label {text}"));
        }

        fn button(&mut self, text: &str) -> bool {
            self.calls.push(format!("button {text}"));
            self.take_press(text)
        }

        fn repeat_button(&mut self, text: &str) -> bool {
            self.calls.push(format!("repeat {text}"));
            self.take_press(text)
        }

        fn text_field(&mut self, value: &str) -> String {
            self.calls.push(format!("field {value}"));
            self.texts.pop_front().unwrap_or_else(|| value.to_string())
        }

        fn text_area(&mut self, value: &str) -> String {
            self.calls.push(format!("area {value}"));
            self.texts.pop_front().unwrap_or_else(|| value.to_string())
        }

        fn toggle(&mut self, value: bool, label: &str) -> bool {
            self.calls.push(format!("toggle {label} {value}"));
            self.flags.pop_front().unwrap_or(value)
        }

        fn toolbar(&mut self, selected: Option<usize>, options: &[String]) -> Option<usize> {
            self.calls
                .push(format!("toolbar {selected:?} {}", options.join("|")));
            self.picks.pop_front().or(selected)
        }

        fn selection_grid(
            &mut self,
            selected: Option<usize>,
            options: &[String],
            columns: usize,
        ) -> Option<usize> {
            self.calls
                .push(format!("grid {selected:?} {} x{columns}", options.join("|")));
            self.picks.pop_front().or(selected)
        }

        fn horizontal_slider(&mut self, value: f32, min: f32, max: f32) -> f32 {
            self.calls.push(format!("hslider {value} [{min}, {max}]"));
            self.slides.pop_front().unwrap_or(value)
        }

        fn vertical_slider(&mut self, value: f32, min: f32, max: f32) -> f32 {
            self.calls.push(format!("vslider {value} [{min}, {max}]"));
            self.slides.pop_front().unwrap_or(value)
        }

        fn space(&mut self, pixels: u32) {
            self.calls.push(format!("space {pixels}"));
        }
    }

    impl ScriptedUi {
        /// Press the button labelled `text` on its next appearance.
        pub fn press(&mut self, text: &str) {
            self.presses.push_back(text.to_string());
        }

        fn take_press(&mut self, text: &str) -> bool {
            if self.presses.front().is_some_and(|p| p == text) {
                self.presses.pop_front();
                true
            } else {
                false
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Lane {
        Left,
        Middle,
        Right,
    }

    impl Enumeration for Lane {
        const VARIANTS: &'static [Self] = &[Lane::Left, Lane::Middle, Lane::Right];
    }

    #[derive(Debug)]
    struct Car {
        driver: String,
        notes: String,
        lights: bool,
        gear: i32,
        lane: Lane,
        speed: f32,
        laps: i32,
        top_speed: f32,
        honks: Vec<i32>,
    }

    impl Car {
        fn honk(&mut self, args: &[Value]) {
            let times = match args.first() {
                Some(Value::Int(n)) => *n,
                _ => 1,
            };
            self.honks.push(times);
        }
    }

    fn car() -> Car {
        Car {
            driver: "kim".into(),
            notes: String::new(),
            lights: false,
            gear: 1,
            lane: Lane::Left,
            speed: 10.0,
            laps: 3,
            top_speed: 120.0,
            honks: Vec::new(),
        }
    }

    fn render(ui: &mut ScriptedUi, car: &mut Car, control: Control) {
        render_control(ui, car, &control).unwrap();
    }

    #[test]
    fn test_labels() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        render(&mut ui, &mut c, Control::label("Status"));
        render(
            &mut ui,
            &mut c,
            Control::dynamic_label(Accessor::getter::<Car, _>("driver", |c| c.driver.clone())),
        );
        c.driver = "lee".into();
        render(
            &mut ui,
            &mut c,
            Control::dynamic_label(field!(Car, driver)),
        );
        assert_eq!(ui.calls, ["label Status", "label kim", "label lee"]);
    }

    #[test]
    fn test_buttons_invoke_with_args() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        let honk = Control::button_with_args("Honk", method!(Car, honk, args), vec![Value::Int(3)]);
        let hold = Control::repeat_button("Hold", Action::method::<Car>("honk", |c, _| c.honks.push(0)));

        render(&mut ui, &mut c, honk.clone());
        ui.press("Honk");
        render(&mut ui, &mut c, honk);
        for _ in 0..3 {
            ui.press("Hold");
            render(&mut ui, &mut c, hold.clone());
        }
        assert_eq!(c.honks, [3, 0, 0, 0]);
        assert_eq!(ui.calls.iter().filter(|c| c.starts_with("repeat")).count(), 3);
    }

    #[test]
    fn test_text_writes_back() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        ui.texts.push_back("max".into());
        render(&mut ui, &mut c, Control::text_field(field!(Car, driver)).unwrap());
        ui.texts.push_back("line 1\nline 2".into());
        render(&mut ui, &mut c, Control::text_area(field!(Car, notes)).unwrap());
        assert_eq!(c.driver, "max");
        assert_eq!(c.notes, "line 1\nline 2");
        assert_eq!(ui.calls, ["field kim", "area "]);
    }

    #[test]
    fn test_toggle_writes_back() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        ui.flags.push_back(true);
        render(&mut ui, &mut c, Control::toggle(field!(Car, lights), "Lights").unwrap());
        assert!(c.lights);
        assert_eq!(ui.calls, ["toggle Lights false"]);
    }

    #[test]
    fn test_enum_toolbar_round_trip() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        let lanes = Control::toolbar(enum_field!(Car, lane), ["L", "M", "R"]).unwrap();

        ui.picks.push_back(2);
        render(&mut ui, &mut c, lanes.clone());
        assert_eq!(c.lane, Lane::Right);

        render(&mut ui, &mut c, lanes);
        assert_eq!(ui.calls[1], "toolbar Some(2) L|M|R");
    }

    #[test]
    fn test_int_selection_grid() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        ui.picks.push_back(4);
        render(
            &mut ui,
            &mut c,
            Control::selection_grid(field!(Car, gear), ["1", "2", "3", "4", "5"], 3).unwrap(),
        );
        assert_eq!(c.gear, 4);
        assert_eq!(ui.calls, ["grid Some(1) 1|2|3|4|5 x3"]);
    }

    #[test]
    fn test_int_choice_out_of_range_is_left_alone() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        let gears = Control::toolbar(field!(Car, gear), ["N", "1", "2"]).unwrap();

        for gear in [-1, 3] {
            c.gear = gear;
            render(&mut ui, &mut c, gears.clone());
            assert_eq!(c.gear, gear);
        }
        assert_eq!(ui.calls, ["toolbar None N|1|2", "toolbar None N|1|2"]);

        // picking an option still writes it
        ui.picks.push_back(2);
        render(&mut ui, &mut c, gears);
        assert_eq!(c.gear, 2);
    }

    #[test]
    fn test_slider_write_back_rounding() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        ui.slides.extend([7.6, 7.6, 2.4]);
        render(&mut ui, &mut c, Control::horizontal_slider(field!(Car, laps), 0.0, 10.0).unwrap());
        render(&mut ui, &mut c, Control::horizontal_slider(field!(Car, speed), 0.0, 10.0).unwrap());
        assert_eq!(c.laps, 8);
        assert_eq!(c.speed, 7.6);

        render(&mut ui, &mut c, Control::vertical_slider(field!(Car, laps), 0.0, 10.0).unwrap());
        assert_eq!(c.laps, 2);
        assert_eq!(ui.calls[0], "hslider 3 [0, 10]");
        assert_eq!(ui.calls[2], "vslider 8 [0, 10]");
    }

    #[test]
    fn test_dynamic_bounds_resolve_every_tick() {
        let mut ui = ScriptedUi::default();
        let mut c = car();
        let slider =
            Control::horizontal_slider(field!(Car, speed), 0.0, field!(Car, top_speed)).unwrap();
        render(&mut ui, &mut c, slider.clone());
        c.top_speed = 200.0;
        render(&mut ui, &mut c, slider);
        assert_eq!(ui.calls, ["hslider 10 [0, 120]", "hslider 10 [0, 200]"]);
    }

    #[test]
    fn test_render_page_in_order() {
        let state = Arc::new(Mutex::new(car()));
        let controls = vec![
            Control::label("Car"),
            Control::spacing(12),
            Control::toggle(field!(Car, lights), "Lights").unwrap(),
        ];
        let page = Page::new("Car", state.clone(), controls, true).unwrap();
        let mut ui = ScriptedUi::default();
        ui.flags.push_back(true);
        render_page(&mut ui, &page).unwrap();
        assert_eq!(ui.calls, ["label Car", "space 12", "toggle Lights false"]);
        assert!(state.lock().unwrap().lights);
    }
}
