//! Attribute bags.
//!
//! Every builder in this crate returns an [`AttrBag`]: the attributes a host
//! should put on one element plus the event handlers it should bind. Builders
//! accept a caller-supplied base bag and merge into it:
//!
//! - a builder-owned attribute replaces a base attribute of the same name;
//! - a builder-owned attribute that is absent removes the base attribute;
//! - event handlers are composed, never replaced: the caller's handler runs
//!   first, then the builder's.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::events::{EventHandler, EventKind, InputEvent};

/// Standard attribute names used by the builders.
pub mod names {
    pub const ID: &str = "id";
    pub const ROLE: &str = "role";
    pub const TAB_INDEX: &str = "tabindex";
    pub const HIDDEN: &str = "hidden";
    pub const DISABLED: &str = "disabled";
    pub const ARIA_CONTROLS: &str = "aria-controls";
    pub const ARIA_DISABLED: &str = "aria-disabled";
    pub const ARIA_EXPANDED: &str = "aria-expanded";
    pub const ARIA_HIDDEN: &str = "aria-hidden";
    pub const ARIA_LABELLEDBY: &str = "aria-labelledby";
    pub const ARIA_LEVEL: &str = "aria-level";
    /// Marker the keyboard dispatcher uses to find live headers.
    pub const ACCORDION_ID_TYPE: &str = "data-accordion-id-type";
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
}

impl AttrValue {
    /// Returns this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
        }
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

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for AttrValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Run `first` (if any), then `second`, with the same event.
pub fn call_all(first: Option<EventHandler>, second: EventHandler) -> EventHandler {
    match first {
        Some(first) => Arc::new(move |event: &mut InputEvent| {
            first(event);
            second(event);
        }),
        None => second,
    }
}

/// Attributes and event bindings for one element.
#[derive(Clone, Default)]
pub struct AttrBag {
    attrs: BTreeMap<String, AttrValue>,
    handlers: HashMap<EventKind, EventHandler>,
}

impl AttrBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form of [`bind`](Self::bind).
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut InputEvent) + Send + Sync + 'static,
    {
        self.bind(kind, Arc::new(handler));
        self
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Set an attribute when `value` is present, remove it when absent.
    pub fn set_opt<V: Into<AttrValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.attrs.insert(name, value.into());
            }
            None => {
                self.attrs.remove(&name);
            }
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.attrs.remove(name)
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Get a string attribute value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    /// Check whether an attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Iterate attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of attributes (bindings are not counted).
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the bag has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Bind a handler, composing it after any handler already bound.
    pub fn bind(&mut self, kind: EventKind, handler: EventHandler) {
        let existing = self.handlers.remove(&kind);
        self.handlers.insert(kind, call_all(existing, handler));
    }

    /// Get the handler bound for `kind`.
    pub fn handler(&self, kind: EventKind) -> Option<EventHandler> {
        self.handlers.get(&kind).cloned()
    }

    /// Check whether a handler is bound for `kind`.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Invoke the handler bound for `kind`, if any.
    ///
    /// Returns `true` if a handler ran.
    pub fn dispatch(&self, event: &mut InputEvent) -> bool {
        match self.handler(event.kind) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for AttrBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<_> = self.handlers.keys().map(|k| k.dom_name()).collect();
        bound.sort_unstable();
        f.debug_struct("AttrBag")
            .field("attrs", &self.attrs)
            .field("handlers", &bound)
            .finish()
    }
}
