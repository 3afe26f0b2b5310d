//! Reactive properties with change detection.
//!
//! A [`Property`] wraps a value and reports whether a write actually changed
//! it, so the owner knows when to emit its notification signal.
//!
//! # Example
//!
//! ```
//! use horizon_accordion_core::{Property, Signal};
//!
//! struct Disclosure {
//!     open: Property<bool>,
//!     open_changed: Signal<bool>,
//! }
//!
//! impl Disclosure {
//!     fn set_open(&self, open: bool) {
//!         if self.open.set(open) {
//!             self.open_changed.emit(open);
//!         }
//!     }
//! }
//!
//! let disclosure = Disclosure { open: Property::new(false), open_changed: Signal::new() };
//! disclosure.set_open(true);
//! assert!(disclosure.open.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value whose writes report whether they changed anything.
///
/// Sections keep their local expansion flag and their controlled value in
/// properties. `Property<T>` is `Send + Sync` whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the old one.
    ///
    /// An equal value leaves the property untouched.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

static_assertions::assert_impl_all!(Property<Option<bool>>: Send, Sync);
