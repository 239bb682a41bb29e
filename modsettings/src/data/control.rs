//! Control descriptors.
//!
//! A [`Control`] is an immutable description of one interactive element and
//! the accessor(s) it is bound to. Value-bearing controls check their
//! accessor's kind once, in the constructor; a descriptor that exists is
//! valid, and nothing re-validates it at render or persist time.

use crate::{
    data::{
        accessor::{Accessor, Action, HostObject},
        value::{Value, ValueKind},
    },
    error::{Error, Result},
};

/// One edge of a slider range.
#[derive(Debug, Clone)]
pub enum Bound {
    /// Fixed value.
    Literal(f32),
    /// Float field of the host, read again on every use.
    Dynamic(Accessor),
}

impl Bound {
    /// Current value of this edge.
    pub fn resolve(&self, host: &HostObject) -> Result<f32> {
        match self {
            Bound::Literal(v) => Ok(*v),
            Bound::Dynamic(accessor) => {
                let value = accessor.get(host)?;
                value.as_f32().ok_or_else(|| {
                    Error::type_mismatch(accessor.name(), ValueKind::Float, value.type_name())
                })
            }
        }
    }

    fn accessor(&self) -> Option<&Accessor> {
        match self {
            Bound::Literal(_) => None,
            Bound::Dynamic(accessor) => Some(accessor),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Bound::Literal(_) => Ok(()),
            Bound::Dynamic(accessor) if accessor.kind() == ValueKind::Float => Ok(()),
            Bound::Dynamic(accessor) => Err(Error::type_mismatch(
                accessor.name(),
                ValueKind::Float,
                accessor.kind(),
            )),
        }
    }
}

impl From<f32> for Bound {
    fn from(value: f32) -> Self {
        Bound::Literal(value)
    }
}

impl From<Accessor> for Bound {
    fn from(accessor: Accessor) -> Self {
        Bound::Dynamic(accessor)
    }
}

/// Source of a label's text. A label has exactly one.
#[derive(Debug, Clone)]
pub enum LabelText {
    Static(String),
    /// Read fresh on every render.
    Dynamic(Accessor),
}

#[derive(Debug, Clone)]
pub struct Label {
    text: LabelText,
}

impl Label {
    pub fn text(&self) -> &LabelText {
        &self.text
    }
}

/// Shared shape of [`Control::Button`] and [`Control::RepeatButton`].
#[derive(Debug, Clone)]
pub struct Button {
    text: String,
    action: Action,
    args: Vec<Value>,
}

impl Button {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Arguments captured at construction, passed on every invoke.
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Shared shape of [`Control::TextField`] and [`Control::TextArea`].
#[derive(Debug, Clone)]
pub struct TextInput {
    accessor: Accessor,
}

impl TextInput {
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }
}

#[derive(Debug, Clone)]
pub struct Toggle {
    accessor: Accessor,
    label: String,
}

impl Toggle {
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Text drawn next to the check box.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Single selection over labelled options, backed by an int or an
/// enumeration. Shared by [`Control::Toolbar`] and [`Control::SelectionGrid`].
#[derive(Debug, Clone)]
pub struct Choice {
    accessor: Accessor,
    options: Vec<String>,
    columns: usize,
}

impl Choice {
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Grid column count. A toolbar lays every option out in one row.
    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// Shared shape of the horizontal and vertical sliders.
#[derive(Debug, Clone)]
pub struct Slider {
    accessor: Accessor,
    min: Bound,
    max: Bound,
}

impl Slider {
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn min(&self) -> &Bound {
        &self.min
    }

    pub fn max(&self) -> &Bound {
        &self.max
    }

    /// Whether write-back rounds to the nearest integer.
    pub fn is_int(&self) -> bool {
        self.accessor.kind() == ValueKind::Int
    }
}

/// The closed set of control descriptors.
#[derive(Debug, Clone)]
pub enum Control {
    Label(Label),
    Button(Button),
    /// Triggers on every tick it is held.
    RepeatButton(Button),
    TextField(TextInput),
    TextArea(TextInput),
    Toggle(Toggle),
    Toolbar(Choice),
    SelectionGrid(Choice),
    HorizontalSlider(Slider),
    VerticalSlider(Slider),
    /// Vertical gap in pixels.
    Spacing(u32),
}

impl Control {
    /// Label with fixed text.
    pub fn label(text: impl Into<String>) -> Self {
        Control::Label(Label {
            text: LabelText::Static(text.into()),
        })
    }

    /// Label showing the current value of `accessor`.
    pub fn dynamic_label(accessor: Accessor) -> Self {
        Control::Label(Label {
            text: LabelText::Dynamic(accessor),
        })
    }

    pub fn button(text: impl Into<String>, action: Action) -> Self {
        Self::button_with_args(text, action, Vec::new())
    }

    pub fn button_with_args(text: impl Into<String>, action: Action, args: Vec<Value>) -> Self {
        Control::Button(Button {
            text: text.into(),
            action,
            args,
        })
    }

    pub fn repeat_button(text: impl Into<String>, action: Action) -> Self {
        Self::repeat_button_with_args(text, action, Vec::new())
    }

    pub fn repeat_button_with_args(
        text: impl Into<String>,
        action: Action,
        args: Vec<Value>,
    ) -> Self {
        Control::RepeatButton(Button {
            text: text.into(),
            action,
            args,
        })
    }

    /// Single-line text input over a string accessor.
    pub fn text_field(accessor: Accessor) -> Result<Self> {
        accessor.expect_kind("string", |k| *k == ValueKind::String)?;
        Ok(Control::TextField(TextInput { accessor }))
    }

    /// Multi-line text input over a string accessor.
    pub fn text_area(accessor: Accessor) -> Result<Self> {
        accessor.expect_kind("string", |k| *k == ValueKind::String)?;
        Ok(Control::TextArea(TextInput { accessor }))
    }

    pub fn toggle(accessor: Accessor, label: impl Into<String>) -> Result<Self> {
        accessor.expect_kind("bool", |k| *k == ValueKind::Bool)?;
        Ok(Control::Toggle(Toggle {
            accessor,
            label: label.into(),
        }))
    }

    /// Horizontal strip of options over an int or enumeration accessor.
    pub fn toolbar<S: Into<String>>(
        accessor: Accessor,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let columns = options.len();
        Choice::new(accessor, options, columns).map(Control::Toolbar)
    }

    /// Grid of options over an int or enumeration accessor.
    pub fn selection_grid<S: Into<String>>(
        accessor: Accessor,
        options: impl IntoIterator<Item = S>,
        columns: usize,
    ) -> Result<Self> {
        let options = options.into_iter().map(Into::into).collect();
        Choice::new(accessor, options, columns).map(Control::SelectionGrid)
    }

    /// Horizontal slider over an int or float accessor.
    pub fn horizontal_slider(
        accessor: Accessor,
        min: impl Into<Bound>,
        max: impl Into<Bound>,
    ) -> Result<Self> {
        Slider::new(accessor, min.into(), max.into()).map(Control::HorizontalSlider)
    }

    /// Vertical slider over an int or float accessor.
    pub fn vertical_slider(
        accessor: Accessor,
        min: impl Into<Bound>,
        max: impl Into<Bound>,
    ) -> Result<Self> {
        Slider::new(accessor, min.into(), max.into()).map(Control::VerticalSlider)
    }

    pub fn spacing(pixels: u32) -> Self {
        Control::Spacing(pixels)
    }

    /// The accessor whose value is persisted, for value-bearing controls.
    pub fn value_accessor(&self) -> Option<&Accessor> {
        match self {
            Control::TextField(input) | Control::TextArea(input) => Some(&input.accessor),
            Control::Toggle(toggle) => Some(&toggle.accessor),
            Control::Toolbar(choice) | Control::SelectionGrid(choice) => Some(&choice.accessor),
            Control::HorizontalSlider(slider) | Control::VerticalSlider(slider) => {
                Some(&slider.accessor)
            }
            Control::Label(_) | Control::Button(_) | Control::RepeatButton(_) | Control::Spacing(_) => {
                None
            }
        }
    }

    /// Fail with [`Error::HostMismatch`] unless every accessor and action of
    /// this control is bound to the type of `host`.
    pub fn check_host(&self, host: &HostObject) -> Result<()> {
        match self {
            Control::Label(label) => match &label.text {
                LabelText::Static(_) => Ok(()),
                LabelText::Dynamic(accessor) => accessor.check_host(host),
            },
            Control::Button(button) | Control::RepeatButton(button) => {
                button.action.check_host(host)
            }
            Control::TextField(input) | Control::TextArea(input) => input.accessor.check_host(host),
            Control::Toggle(toggle) => toggle.accessor.check_host(host),
            Control::Toolbar(choice) | Control::SelectionGrid(choice) => {
                choice.accessor.check_host(host)
            }
            Control::HorizontalSlider(slider) | Control::VerticalSlider(slider) => {
                slider.accessor.check_host(host)?;
                [&slider.min, &slider.max]
                    .into_iter()
                    .filter_map(Bound::accessor)
                    .try_for_each(|accessor| accessor.check_host(host))
            }
            Control::Spacing(_) => Ok(()),
        }
    }

    /// Variant name, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Control::Label(_) => "Label",
            Control::Button(_) => "Button",
            Control::RepeatButton(_) => "RepeatButton",
            Control::TextField(_) => "TextField",
            Control::TextArea(_) => "TextArea",
            Control::Toggle(_) => "Toggle",
            Control::Toolbar(_) => "Toolbar",
            Control::SelectionGrid(_) => "SelectionGrid",
            Control::HorizontalSlider(_) => "HorizontalSlider",
            Control::VerticalSlider(_) => "VerticalSlider",
            Control::Spacing(_) => "Spacing",
        }
    }
}

impl Choice {
    /// An enumeration needs exactly one option per variant.
    fn new(accessor: Accessor, options: Vec<String>, columns: usize) -> Result<Self> {
        accessor.expect_kind("int or enum", ValueKind::is_choice)?;
        match accessor.kind() {
            ValueKind::Enum { variants, .. } if variants != options.len() => {
                return Err(Error::type_mismatch(
                    accessor.name(),
                    format!("{variants} options"),
                    format!("{} options", options.len()),
                ));
            }
            _ => {}
        }
        Ok(Self {
            accessor,
            options,
            columns: columns.max(1),
        })
    }
}

impl Slider {
    fn new(accessor: Accessor, min: Bound, max: Bound) -> Result<Self> {
        accessor.expect_kind("int or float", ValueKind::is_numeric)?;
        min.validate()?;
        max.validate()?;
        Ok(Self { accessor, min, max })
    }
}
