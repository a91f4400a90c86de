//! Core value types carried by a [`VNode`](crate::VNode) description.
//!
//! - [`Key`] - stable sibling identity
//! - [`AttrValue`] - attribute / property payload
//! - [`VNodeStyle`] - inline styles plus the delayed/remove/destroy phases
//! - map aliases read by the concrete modules

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::renderer::Backend;

// =============================================================================
// Key
// =============================================================================

/// Caller-assigned sibling identity used for reorder-aware reconciliation.
///
/// String and numeric keys never compare equal: `Key::from("1") != Key::from(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Textual key.
    Str(String),
    /// Numeric key.
    Num(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Num(i64::from(value))
    }
}

/// Indices beyond `i64::MAX` saturate to `i64::MAX`.
impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Self::Num(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

// =============================================================================
// AttrValue
// =============================================================================

/// Payload of an attribute or a property.
///
/// Booleans have attribute semantics in [`AttributesModule`](crate::modules::AttributesModule):
/// `true` sets an empty attribute, `false` removes it.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Number.
    Num(f64),
    /// String.
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

// =============================================================================
// Module data maps
// =============================================================================

/// Attributes by name.
pub type Attrs = HashMap<String, AttrValue>;

/// Properties by name.
pub type Props = HashMap<String, AttrValue>;

/// Class name to enabled flag.
pub type Classes = HashMap<String, bool>;

/// `data-*` entries by camelCase key.
pub type Dataset = HashMap<String, String>;

/// Event handler invoked with the backend's event payload.
pub type EventHandler<B> = Rc<dyn Fn(&<B as Backend>::Event)>;

/// Event name to handler.
pub type On<B> = HashMap<String, EventHandler<B>>;

/// Inline styles of an element.
///
/// `props` are applied immediately. `delayed` entries are applied two
/// animation frames after creation/update so that transitions run, `destroy`
/// entries are applied when the node is destroyed, and `remove` entries are
/// applied when the node is removed, delaying detachment until their
/// transitions end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VNodeStyle {
    /// Styles applied immediately. Names starting with `--` are custom properties.
    pub props: HashMap<String, String>,
    /// Styles applied on the next-next animation frame.
    pub delayed: HashMap<String, String>,
    /// Styles applied before removal.
    pub remove: HashMap<String, String>,
    /// Styles applied on destroy.
    pub destroy: HashMap<String, String>,
}

impl VNodeStyle {
    /// True when no phase carries any style.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
            && self.delayed.is_empty()
            && self.remove.is_empty()
            && self.destroy.is_empty()
    }
}
