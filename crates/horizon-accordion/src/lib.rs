//! Horizon Accordion - accessible accordion widgets for any rendering surface.
//!
//! An accordion is a vertical stack of sections, each with a header that
//! toggles a collapsible panel. This crate owns the behaviour and the ARIA
//! contract; the host owns rendering. Every builder returns an
//! [`AttrBag`] the host applies to one element of its
//! [`RenderSurface`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_accordion::prelude::*;
//!
//! let document = Arc::new(Document::new());
//! let accordion = Accordion::new(AccordionConfig::default(), document.clone());
//! let section = Section::new(&accordion.context(), SectionConfig::new());
//! section.mount();
//!
//! // One render pass.
//! let acx = accordion.context();
//! let scx = section.context();
//! let header = Header::new(&acx, &scx, HeaderConfig::new());
//! let panel = Panel::new(&acx, &scx);
//!
//! let toggle = document.create_element("button");
//! document.append_child(document.root(), toggle);
//! document.apply(toggle, header.button_toggle_props(AttrBag::new()));
//! assert_eq!(
//!     panel.panel_props(AttrBag::new()).get_str("aria-labelledby"),
//!     Some(header.id().as_str()),
//! );
//!
//! document.click(toggle);
//! assert!(section.is_expanded());
//! ```

pub use horizon_accordion_core::*;

pub mod accordion;
pub mod attributes;
pub mod config;
pub mod error;
pub mod events;
pub mod header;
pub mod navigation;
pub mod panel;
pub mod prelude;
pub mod registry;
pub mod section;
pub mod surface;

pub use accordion::{
    region_role_disabled, Accordion, AccordionContext, AccordionControls, MAX_REGION_SECTIONS,
};
pub use attributes::{call_all, AttrBag, AttrValue};
pub use config::{AccordionConfig, AccordionDocument, HeaderConfig, SectionConfig, SectionDocument};
pub use error::ConfigError;
pub use events::{EventHandler, EventKind, InputEvent, Key};
pub use header::{Header, ToggleVariant};
pub use navigation::{HeaderNavigator, NavigationCommand};
pub use panel::Panel;
pub use registry::{Command, SectionEntry, SectionRegistry};
pub use section::{Section, SectionContext, ToggleCallback};
pub use surface::{Document, ElementId, RenderSurface};
