//! Roving keyboard focus across accordion headers.
//!
//! Key-down events on any header of an accordion are routed to one
//! [`HeaderNavigator`]. It asks the rendering surface for the live list of
//! header elements, locates the header the handler is bound to (the event's
//! `current_target`, so key-downs bubbling up from inside a header still
//! count) and moves focus:
//!
//! | Key       | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | ArrowDown | next header; at the last header, first one if wrapping   |
//! | ArrowUp   | previous header; at the first, last one if wrapping      |
//! | Home      | first header                                             |
//! | End       | last header                                              |
//!
//! Both arrow keys suppress the event's default action whether or not focus
//! moves, so the page does not scroll under the user.
//!
//! The header list is queried on every key press and never cached. Sections
//! can mount, unmount and move between two key presses, and an index into a
//! stale list would send focus to the wrong header.

use std::sync::Arc;

use horizon_accordion_core::logging::{span_names, targets};

use crate::events::{InputEvent, Key};
use crate::surface::{ElementId, RenderSurface};

/// A focus movement requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Move to the following header.
    Next,
    /// Move to the preceding header.
    Previous,
    /// Move to the first header.
    First,
    /// Move to the last header.
    Last,
}

impl NavigationCommand {
    /// Map a key to its navigation command, if it has one.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Self::Next),
            Key::ArrowUp => Some(Self::Previous),
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            _ => None,
        }
    }

    /// Whether the command suppresses the key's default action.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Next | Self::Previous)
    }
}

/// Resolve the index focus should move to.
///
/// `current` is the focused header's index in a list of `len` headers, or
/// `None` if the focused element is not a live header. Returns `None` when
/// focus should stay where it is.
pub fn resolve_target(
    command: NavigationCommand,
    current: Option<usize>,
    len: usize,
    wrap: bool,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;

    match command {
        NavigationCommand::First => Some(0),
        NavigationCommand::Last => Some(last),
        NavigationCommand::Next => {
            let current = current?;
            if current >= last {
                wrap.then_some(0)
            } else {
                Some(current + 1)
            }
        }
        NavigationCommand::Previous => {
            let current = current?.min(last);
            if current == 0 {
                wrap.then_some(last)
            } else {
                Some(current - 1)
            }
        }
    }
}

/// Dispatches header key-down events for one accordion.
#[derive(Clone)]
pub struct HeaderNavigator {
    surface: Arc<dyn RenderSurface>,
    marker: String,
    wrap: bool,
}

impl HeaderNavigator {
    /// Create a navigator over the headers tagged with `marker`.
    pub fn new(surface: Arc<dyn RenderSurface>, marker: impl Into<String>, wrap: bool) -> Self {
        Self {
            surface,
            marker: marker.into(),
            wrap,
        }
    }

    /// The header marker this navigator queries for.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether navigation wraps around at the ends of the list.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// The live header list, in document order.
    pub fn live_headers(&self) -> Vec<ElementId> {
        self.surface.query_by_marker(&self.marker)
    }

    /// Handle a key-down on a header.
    ///
    /// Returns the element that received focus, or `None` if the key is not
    /// a navigation key or focus stayed put.
    pub fn handle_key_down(&self, event: &mut InputEvent) -> Option<ElementId> {
        let command = event.key.and_then(NavigationCommand::from_key)?;

        let _span =
            tracing::trace_span!(target: targets::NAVIGATION, span_names::KEY_DISPATCH, ?command)
                .entered();

        if command.prevents_default() {
            event.prevent_default();
        }

        let headers = self.live_headers();
        let current = headers
            .iter()
            .position(|&header| header == event.current_target);

        let Some(index) = resolve_target(command, current, headers.len(), self.wrap) else {
            tracing::trace!(
                target: targets::NAVIGATION,
                ?command,
                ?current,
                count = headers.len(),
                "focus stays"
            );
            return None;
        };

        let element = headers[index];
        tracing::debug!(target: targets::NAVIGATION, ?command, ?current, index, "moving focus");
        self.surface.focus(element);
        Some(element)
    }
}
