//! Section headers.
//!
//! A [`Header`] builds the attributes for a section's heading wrapper and its
//! toggle control. The toggle comes in two flavours:
//!
//! - [`ToggleVariant::Button`] for a native button, which activates itself
//!   on Enter and Space and takes the `disabled` attribute;
//! - [`ToggleVariant::Element`] for any other element, which gets
//!   `role="button"`, a tab stop and its own Enter/Space handling.
//!
//! Both variants toggle on click and route key-down events to the
//! accordion's header navigation.

use std::sync::Arc;

use horizon_accordion_core::logging::targets;

use crate::accordion::AccordionContext;
use crate::attributes::{names, AttrBag};
use crate::config::HeaderConfig;
use crate::events::{EventKind, InputEvent, Key};
use crate::section::SectionContext;

/// Which kind of element the header toggle is rendered as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleVariant {
    /// A generic element acting as a button.
    Element,
    /// A native button.
    #[default]
    Button,
}

/// Flip the section unless the header is disabled.
fn toggle_section(section: &SectionContext, disabled: bool) -> bool {
    if disabled {
        tracing::trace!(target: targets::HEADER, section = section.section_id(), "disabled header ignored toggle");
        return false;
    }
    section.toggle(!section.current_expanded());
    true
}

/// The header of one section.
#[derive(Debug, Clone)]
pub struct Header {
    accordion: AccordionContext,
    section: SectionContext,
    config: HeaderConfig,
}

impl Header {
    pub fn new(accordion: &AccordionContext, section: &SectionContext, config: HeaderConfig) -> Self {
        Self {
            accordion: accordion.clone(),
            section: section.clone(),
            config,
        }
    }

    /// Id of the toggle element, `"{section_id}-header"`.
    pub fn id(&self) -> String {
        self.section.header_id()
    }

    /// Expansion as of this render pass.
    pub fn is_expanded(&self) -> bool {
        self.section.is_expanded()
    }

    pub fn is_disabled(&self) -> bool {
        self.config.is_disabled()
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Flip the section, as a click on the toggle would.
    ///
    /// Returns `false` without touching the section if the header is
    /// disabled.
    pub fn toggle(&self) -> bool {
        toggle_section(&self.section, self.is_disabled())
    }

    /// Attributes for the heading wrapper.
    pub fn heading_props(&self, base: AttrBag) -> AttrBag {
        base.with(names::ROLE, "heading")
            .with(names::ARIA_LEVEL, self.config.heading_level)
    }

    /// Attributes for a generic element acting as the toggle.
    pub fn element_toggle_props(&self, base: AttrBag) -> AttrBag {
        self.toggle_props(ToggleVariant::Element, base)
    }

    /// Attributes for a native button acting as the toggle.
    pub fn button_toggle_props(&self, base: AttrBag) -> AttrBag {
        self.toggle_props(ToggleVariant::Button, base)
    }

    /// Attributes for the toggle control.
    pub fn toggle_props(&self, variant: ToggleVariant, base: AttrBag) -> AttrBag {
        let mut bag = base;
        let disabled = self.is_disabled();

        bag.set(names::ID, self.id());
        bag.set(names::ARIA_CONTROLS, self.section.panel_id());
        bag.set_opt(names::ARIA_DISABLED, self.config.disabled);
        bag.set(names::ARIA_EXPANDED, self.is_expanded());
        bag.set(names::ACCORDION_ID_TYPE, self.accordion.header_marker());

        let section = self.section.clone();
        bag.bind(
            EventKind::Click,
            Arc::new(move |_event: &mut InputEvent| {
                toggle_section(&section, disabled);
            }),
        );
        bag.bind(EventKind::KeyDown, self.accordion.key_down_handler());

        match variant {
            ToggleVariant::Element => {
                bag.set(names::ROLE, "button");
                bag.set(names::TAB_INDEX, 0i64);

                let section = self.section.clone();
                bag.bind(
                    EventKind::KeyPress,
                    Arc::new(move |event: &mut InputEvent| {
                        if !event.key.is_some_and(Key::is_activation) {
                            return;
                        }
                        event.prevent_default();
                        toggle_section(&section, disabled);
                    }),
                );
            }
            ToggleVariant::Button => {
                bag.set_opt(names::DISABLED, self.config.disabled);
            }
        }

        bag
    }
}
