use std::{
    any::{Any, TypeId},
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    data::value::{Enumeration, FieldType, Value, ValueKind},
    error::{Error, Result},
};

/// Type-erased host state object.
pub type HostObject = dyn Any + Send;

/// Shared handle to a host module's state, bound to one page.
///
/// The owning module keeps its own typed `Arc<Mutex<H>>`; passing a clone
/// where a `Host` is expected coerces it.
pub type Host = Arc<Mutex<HostObject>>;

/// Lock a host, recovering the state of a poisoned mutex.
pub fn lock_host(host: &Host) -> MutexGuard<'_, HostObject> {
    host.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Rejected {
    Host,
    Value(&'static str),
}

type Getter = dyn Fn(&HostObject) -> std::result::Result<Value, Rejected> + Send + Sync;
type Setter = dyn Fn(&mut HostObject, Value) -> std::result::Result<(), Rejected> + Send + Sync;
type Invoker = dyn Fn(&mut HostObject, &[Value]) -> bool + Send + Sync;

/// Named, typed get/set capability over one field of a host object.
///
/// Accessors never own the host; every call is resolved against the host
/// passed in, so a `set` followed by a `get` always observes the new value.
#[derive(Clone)]
pub struct Accessor {
    name: String,
    kind: ValueKind,
    host_type: &'static str,
    host_id: TypeId,
    getter: Arc<Getter>,
    setter: Option<Arc<Setter>>,
}

impl Accessor {
    /// Bind a `String`, `bool`, `i32` or `f32` field of `H`.
    pub fn field<H, T>(
        name: impl Into<String>,
        get: impl Fn(&H) -> T + Send + Sync + 'static,
        set: impl Fn(&mut H, T) + Send + Sync + 'static,
    ) -> Self
    where
        H: Any + Send,
        T: FieldType,
    {
        Self {
            name: name.into(),
            kind: T::KIND,
            host_type: std::any::type_name::<H>(),
            host_id: TypeId::of::<H>(),
            getter: Arc::new(move |host: &HostObject| {
                let h = host.downcast_ref::<H>().ok_or(Rejected::Host)?;
                Ok(get(h).into_value())
            }),
            setter: Some(Arc::new(move |host: &mut HostObject, value: Value| {
                let h = host.downcast_mut::<H>().ok_or(Rejected::Host)?;
                let name = value.type_name();
                let v = T::from_value(value).ok_or(Rejected::Value(name))?;
                set(h, v);
                Ok(())
            })),
        }
    }

    /// Bind an enumeration field of `H`; values cross the accessor as ordinals.
    pub fn enumeration<H, E>(
        name: impl Into<String>,
        get: impl Fn(&H) -> E + Send + Sync + 'static,
        set: impl Fn(&mut H, E) + Send + Sync + 'static,
    ) -> Self
    where
        H: Any + Send,
        E: Enumeration,
    {
        Self {
            name: name.into(),
            kind: E::kind(),
            host_type: std::any::type_name::<H>(),
            host_id: TypeId::of::<H>(),
            getter: Arc::new(move |host: &HostObject| {
                let h = host.downcast_ref::<H>().ok_or(Rejected::Host)?;
                get(h)
                    .ordinal()
                    .map(Value::Enum)
                    .ok_or(Rejected::Value("variant missing from VARIANTS"))
            }),
            setter: Some(Arc::new(move |host: &mut HostObject, value: Value| {
                let h = host.downcast_mut::<H>().ok_or(Rejected::Host)?;
                let variant = match value {
                    Value::Enum(ordinal) => E::from_ordinal(ordinal),
                    _ => None,
                };
                set(h, variant.ok_or(Rejected::Value(value.type_name()))?);
                Ok(())
            })),
        }
    }

    /// Read-only accessor rendering any displayable field as text.
    ///
    /// Used by dynamic labels; it cannot back a value-bearing control.
    pub fn getter<H, T>(name: impl Into<String>, get: impl Fn(&H) -> T + Send + Sync + 'static) -> Self
    where
        H: Any + Send,
        T: fmt::Display,
    {
        Self {
            name: name.into(),
            kind: ValueKind::String,
            host_type: std::any::type_name::<H>(),
            host_id: TypeId::of::<H>(),
            getter: Arc::new(move |host: &HostObject| {
                let h = host.downcast_ref::<H>().ok_or(Rejected::Host)?;
                Ok(Value::String(get(h).to_string()))
            }),
            setter: None,
        }
    }

    /// Accessor name, also the persisted entry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the current value from `host`.
    pub fn get(&self, host: &HostObject) -> Result<Value> {
        (self.getter)(host).map_err(|rejected| self.rejected(rejected))
    }

    /// Write `value` into `host`.
    ///
    /// The value must already be of this accessor's kind; see
    /// [`Value::coerce`].
    pub fn set(&self, host: &mut HostObject, value: Value) -> Result<()> {
        let Some(setter) = &self.setter else {
            return Err(Error::type_mismatch(&self.name, self.kind, "read-only accessor"));
        };
        setter(host, value).map_err(|rejected| self.rejected(rejected))
    }

    /// Fail with [`Error::HostMismatch`] unless `host` is of the type this
    /// accessor was bound to.
    pub fn check_host(&self, host: &HostObject) -> Result<()> {
        if host.type_id() == self.host_id {
            Ok(())
        } else {
            Err(self.host_mismatch())
        }
    }

    /// Fail with [`Error::TypeMismatch`] unless this accessor is writable and
    /// `accepts` its kind.
    pub(crate) fn expect_kind(
        &self,
        expected: &str,
        accepts: impl Fn(&ValueKind) -> bool,
    ) -> Result<()> {
        if !accepts(&self.kind) {
            return Err(Error::type_mismatch(&self.name, expected, self.kind));
        }
        if !self.is_writable() {
            return Err(Error::type_mismatch(
                &self.name,
                expected,
                format!("read-only {}", self.kind),
            ));
        }
        Ok(())
    }

    fn rejected(&self, rejected: Rejected) -> Error {
        match rejected {
            Rejected::Host => self.host_mismatch(),
            Rejected::Value(actual) => Error::type_mismatch(&self.name, self.kind, actual),
        }
    }

    fn host_mismatch(&self) -> Error {
        Error::HostMismatch {
            accessor: self.name.clone(),
            expected: self.host_type,
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("host", &self.host_type)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Named, invoke-only capability over a method of a host object.
#[derive(Clone)]
pub struct Action {
    name: String,
    host_type: &'static str,
    host_id: TypeId,
    invoker: Arc<Invoker>,
}

impl Action {
    /// Bind a method of `H`. The method receives the argument list captured
    /// by the button that triggers it.
    pub fn method<H>(
        name: impl Into<String>,
        f: impl Fn(&mut H, &[Value]) + Send + Sync + 'static,
    ) -> Self
    where
        H: Any + Send,
    {
        Self {
            name: name.into(),
            host_type: std::any::type_name::<H>(),
            host_id: TypeId::of::<H>(),
            invoker: Arc::new(move |host: &mut HostObject, args: &[Value]| {
                match host.downcast_mut::<H>() {
                    Some(h) => {
                        f(h, args);
                        true
                    }
                    None => false,
                }
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the method once. Nothing is returned to the caller.
    pub fn invoke(&self, host: &mut HostObject, args: &[Value]) -> Result<()> {
        if (self.invoker)(host, args) {
            Ok(())
        } else {
            Err(self.host_mismatch())
        }
    }

    /// Fail with [`Error::HostMismatch`] unless `host` is of the type this
    /// action was bound to.
    pub fn check_host(&self, host: &HostObject) -> Result<()> {
        if host.type_id() == self.host_id {
            Ok(())
        } else {
            Err(self.host_mismatch())
        }
    }

    fn host_mismatch(&self) -> Error {
        Error::HostMismatch {
            accessor: self.name.clone(),
            expected: self.host_type,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("host", &self.host_type)
            .finish()
    }
}

/// Bind a field of a host struct by name.
///
/// ```
/// use modsettings::{field, ValueKind};
///
/// struct Player {
///     speed: f32,
/// }
///
/// let speed = field!(Player, speed);
/// assert_eq!(speed.name(), "speed");
/// assert_eq!(speed.kind(), ValueKind::Float);
/// ```
#[macro_export]
macro_rules! field {
    ($host:ty, $field:ident) => {
        $crate::Accessor::field::<$host, _>(
            stringify!($field),
            |host: &$host| ::std::clone::Clone::clone(&host.$field),
            |host: &mut $host, value| host.$field = value,
        )
    };
}

/// Bind an [`Enumeration`](crate::Enumeration) field of a host struct by name.
#[macro_export]
macro_rules! enum_field {
    ($host:ty, $field:ident) => {
        $crate::Accessor::enumeration::<$host, _>(
            stringify!($field),
            |host: &$host| host.$field,
            |host: &mut $host, value| host.$field = value,
        )
    };
}

/// Bind a method of a host struct by name.
///
/// `method!(Host, name)` calls `host.name()`; `method!(Host, name, args)`
/// calls `host.name(args)` with the button's captured `&[Value]`.
#[macro_export]
macro_rules! method {
    ($host:ty, $method:ident, args) => {
        $crate::Action::method::<$host>(
            stringify!($method),
            |host: &mut $host, args: &[$crate::Value]| {
                host.$method(args);
            },
        )
    };
    ($host:ty, $method:ident) => {
        $crate::Action::method::<$host>(
            stringify!($method),
            |host: &mut $host, _args: &[$crate::Value]| {
                host.$method();
            },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Mode {
        Walk,
        Run,
        Fly,
    }

    impl Enumeration for Mode {
        const VARIANTS: &'static [Self] = &[Mode::Walk, Mode::Run, Mode::Fly];
    }

    struct Player {
        name: String,
        speed: f32,
        mode: Mode,
        jumps: u32,
    }

    impl Player {
        fn jump(&mut self) {
            self.jumps += 1;
        }
    }

    fn player() -> Player {
        Player {
            name: "alice".into(),
            speed: 1.5,
            mode: Mode::Walk,
            jumps: 0,
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut p = player();
        let speed = field!(Player, speed);
        speed.set(&mut p, Value::Float(3.25)).unwrap();
        assert_eq!(speed.get(&p).unwrap(), Value::Float(3.25));
        assert_eq!(p.speed, 3.25);
    }

    #[test]
    fn test_enum_ordinals() {
        let mut p = player();
        let mode = enum_field!(Player, mode);
        assert_eq!(mode.get(&p).unwrap(), Value::Enum(0));
        mode.set(&mut p, Value::Enum(2)).unwrap();
        assert_eq!(p.mode, Mode::Fly);
        assert!(matches!(
            mode.set(&mut p, Value::Enum(3)),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Gait {
        Walk,
        Crawl,
    }

    impl Enumeration for Gait {
        const VARIANTS: &'static [Self] = &[Gait::Walk];
    }

    #[test]
    fn test_unlisted_variant_is_an_error() {
        let crawl = Accessor::enumeration::<Player, _>("gait", |_| Gait::Crawl, |_, _| {});
        let walk = Accessor::enumeration::<Player, _>("gait", |_| Gait::Walk, |_, _| {});
        let p = player();
        assert!(matches!(crawl.get(&p), Err(Error::TypeMismatch { .. })));
        assert_eq!(walk.get(&p).unwrap(), Value::Enum(0));
    }

    #[test]
    fn test_check_host() {
        let p = player();
        let other = 5_u8;
        let speed = field!(Player, speed);
        let jump = method!(Player, jump);
        assert!(speed.check_host(&p).is_ok());
        assert!(jump.check_host(&p).is_ok());
        assert!(matches!(speed.check_host(&other), Err(Error::HostMismatch { .. })));
        assert!(matches!(jump.check_host(&other), Err(Error::HostMismatch { .. })));
    }

    #[test]
    fn test_wrong_value_kind() {
        let mut p = player();
        let name = field!(Player, name);
        let err = name.set(&mut p, Value::Int(1)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { accessor, .. } if accessor == "name"));
        assert_eq!(p.name, "alice");
    }

    #[test]
    fn test_wrong_host() {
        let mut other = 5_u8;
        let speed = field!(Player, speed);
        assert!(matches!(speed.get(&other), Err(Error::HostMismatch { .. })));
        assert!(matches!(
            speed.set(&mut other, Value::Float(1.0)),
            Err(Error::HostMismatch { .. })
        ));
    }

    #[test]
    fn test_getter_is_read_only() {
        let mut p = player();
        let label = Accessor::getter::<Player, _>("jumps", |p| p.jumps);
        assert_eq!(label.get(&p).unwrap(), Value::String("0".into()));
        assert!(label.set(&mut p, Value::String("1".into())).is_err());
    }

    #[test]
    fn test_action_invoke() {
        let mut p = player();
        let jump = method!(Player, jump);
        jump.invoke(&mut p, &[]).unwrap();
        jump.invoke(&mut p, &[]).unwrap();
        assert_eq!(p.jumps, 2);
        assert_eq!(jump.name(), "jump");
    }
}
