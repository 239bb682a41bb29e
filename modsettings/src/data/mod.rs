//! Declarative control data.
//!
//! - [`value`] - Values crossing the accessor boundary and their kinds
//! - [`accessor`] - Named get/set/invoke capabilities over host state
//! - [`control`] - The closed set of control descriptors
//! - [`page`] - A module's control list bound to its host object

/// Accessors and actions over type-erased host objects.
pub mod accessor;

/// Control descriptor variants and slider bounds.
pub mod control;

/// Pages and display-name formatting.
pub mod page;

/// Value and kind definitions.
pub mod value;

pub use accessor::{Accessor, Action, Host, HostObject};
pub use control::{Bound, Control};
pub use page::{Page, format_name};
pub use value::{Enumeration, FieldType, Value, ValueKind};
