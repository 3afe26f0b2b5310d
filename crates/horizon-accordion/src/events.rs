//! Input events delivered by the rendering surface.
//!
//! The accordion only consumes three kinds of raw input: clicks, key-down and
//! key-press. Each event carries the element it was dispatched to, the key
//! involved (for keyboard events) and a default-action flag that handlers can
//! set to suppress the surface's built-in behavior, such as scrolling the
//! page on Space or the arrow keys.

use std::sync::Arc;

use crate::surface::ElementId;

/// A bound event handler.
///
/// Handlers are shared so that the same binding can be stored on an element
/// and composed with caller-supplied handlers.
pub type EventHandler = Arc<dyn Fn(&mut InputEvent) + Send + Sync>;

/// The kinds of input events the accordion binds handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Pointer activation (or a native button's keyboard activation).
    Click,
    /// A key went down.
    KeyDown,
    /// A key produced a character (fires after key-down).
    KeyPress,
}

impl EventKind {
    /// The DOM event name for this kind.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
        }
    }
}

/// Keyboard keys the accordion distinguishes.
///
/// Keys follow DOM `KeyboardEvent.key` naming. Keys without a dedicated
/// variant are carried as [`Key::Character`] when they produce a single
/// character, and as [`Key::Unidentified`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Activation
    Enter,
    Space,

    // Focus / dismissal
    Tab,
    Escape,

    /// A printable key other than Space.
    Character(char),
    /// A named key the accordion has no use for.
    Unidentified,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    ///
    /// ```
    /// use horizon_accordion::Key;
    ///
    /// assert_eq!(Key::from_dom_key("ArrowDown"), Key::ArrowDown);
    /// assert_eq!(Key::from_dom_key(" "), Key::Space);
    /// assert_eq!(Key::from_dom_key("a"), Key::Character('a'));
    /// ```
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Unidentified,
                }
            }
        }
    }

    /// Whether this key activates a focused control (Enter or Space).
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// An input event dispatched to an element.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// What happened.
    pub kind: EventKind,
    /// The key involved, for keyboard events.
    pub key: Option<Key>,
    /// The element the event was dispatched to.
    pub target: ElementId,
    /// The element whose handler is running. Differs from `target` while
    /// the event bubbles through the target's ancestors.
    pub current_target: ElementId,
    default_prevented: bool,
}

impl InputEvent {
    /// Create a click event.
    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click, None, target)
    }

    /// Create a key-down event.
    pub fn key_down(target: ElementId, key: Key) -> Self {
        Self::new(EventKind::KeyDown, Some(key), target)
    }

    /// Create a key-press event.
    pub fn key_press(target: ElementId, key: Key) -> Self {
        Self::new(EventKind::KeyPress, Some(key), target)
    }

    fn new(kind: EventKind, key: Option<Key>, target: ElementId) -> Self {
        Self {
            kind,
            key,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    /// Suppress the surface's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if a handler suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
