use std::fmt;

/// Semantic type of the value behind an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// UTF-8 text.
    String,
    /// Boolean flag.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// Fieldless enumeration, carried as an ordinal.
    Enum {
        /// Rust type name of the enumeration.
        type_name: &'static str,
        /// Number of variants.
        variants: usize,
    },
}

impl ValueKind {
    /// Whether a toolbar or selection grid can bind this kind.
    pub fn is_choice(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Enum { .. })
    }

    /// Whether a slider can bind this kind.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Enum { type_name, .. } => write!(f, "enum {type_name}"),
        }
    }
}

/// A value read from or written to host state.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i32),
    Float(f32),
    /// Enumeration ordinal.
    Enum(usize),
}

impl Value {
    /// Whether this value can be stored through an accessor of `kind`
    /// without conversion.
    pub fn matches(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Value::String(_), ValueKind::String)
            | (Value::Bool(_), ValueKind::Bool)
            | (Value::Int(_), ValueKind::Int)
            | (Value::Float(_), ValueKind::Float) => true,
            (Value::Enum(ordinal), ValueKind::Enum { variants, .. }) => *ordinal < variants,
            _ => false,
        }
    }

    /// Convert into `kind` where the conversion loses nothing.
    ///
    /// Integers widen to floats, integral floats narrow to integers and
    /// in-range integers become enumeration ordinals (and back).
    pub fn coerce(self, kind: ValueKind) -> Option<Value> {
        if self.matches(kind) {
            return Some(self);
        }
        match (self, kind) {
            (Value::Int(i), ValueKind::Float) => Some(Value::Float(i as f32)),
            (Value::Float(f), ValueKind::Int) if f.fract() == 0.0 => {
                i32::try_from(f as i64).ok().map(Value::Int)
            }
            (Value::Int(i), ValueKind::Enum { variants, .. }) => usize::try_from(i)
                .ok()
                .filter(|ordinal| *ordinal < variants)
                .map(Value::Enum),
            (Value::Enum(ordinal), ValueKind::Int) => i32::try_from(ordinal).ok().map(Value::Int),
            _ => None,
        }
    }

    /// Numeric value as shown by a slider.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Int(i) => Some(*i as f32),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Short name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Enum(_) => "enum ordinal",
        }
    }

    /// Encode for a preference file. Ordinals are written as integers.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            Value::String(s) => toml::Value::String(s.clone()),
            Value::Bool(b) => toml::Value::Boolean(*b),
            Value::Int(i) => toml::Value::Integer(i64::from(*i)),
            Value::Float(f) => toml::Value::Float(f64::from(*f)),
            Value::Enum(ordinal) => toml::Value::Integer(*ordinal as i64),
        }
    }

    /// Decode a raw preference file value.
    ///
    /// The result is untyped; callers [`coerce`](Value::coerce) it to the
    /// kind of the entry it belongs to.
    pub fn from_toml(value: &toml::Value) -> Option<Value> {
        match value {
            toml::Value::String(s) => Some(Value::String(s.clone())),
            toml::Value::Boolean(b) => Some(Value::Bool(*b)),
            toml::Value::Integer(i) => i32::try_from(*i).ok().map(Value::Int),
            toml::Value::Float(f) => Some(Value::Float(*f as f32)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Enum(ordinal) => write!(f, "{ordinal}"),
        }
    }
}

/// Rust types that can back a value accessor directly.
pub trait FieldType: Sized + 'static {
    /// The kind reported by accessors over this type.
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Option<Self>;
}

impl FieldType for String {
    const KIND: ValueKind = ValueKind::String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FieldType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FieldType for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl FieldType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

/// Fieldless enumerations selectable through toolbars and selection grids.
///
/// ```
/// use modsettings::Enumeration;
///
/// #[derive(Clone, Copy, PartialEq)]
/// enum Quality {
///     Low,
///     Medium,
///     High,
/// }
///
/// impl Enumeration for Quality {
///     const VARIANTS: &'static [Self] = &[Quality::Low, Quality::Medium, Quality::High];
/// }
///
/// assert_eq!(Quality::High.ordinal(), Some(2));
/// assert!(Quality::from_ordinal(3).is_none());
/// ```
pub trait Enumeration: Copy + PartialEq + 'static {
    /// Every variant, in ordinal order.
    const VARIANTS: &'static [Self];

    /// Position of `self` in [`VARIANTS`](Enumeration::VARIANTS); `None`
    /// for a variant the list leaves out.
    fn ordinal(self) -> Option<usize> {
        Self::VARIANTS.iter().position(|variant| *variant == self)
    }

    /// Variant at `ordinal`, if any.
    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::VARIANTS.get(ordinal).copied()
    }

    /// Kind reported by accessors over this enumeration.
    fn kind() -> ValueKind {
        ValueKind::Enum {
            type_name: std::any::type_name::<Self>(),
            variants: Self::VARIANTS.len(),
        }
    }
}
