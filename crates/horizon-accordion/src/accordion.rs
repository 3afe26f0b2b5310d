//! The accordion controller.
//!
//! [`Accordion`] owns the section registry and everything the sections below
//! it share: the accordion id, the landmark-region policy, the registry
//! mutators and the header key-down dispatcher. Descendants never reach for
//! that state implicitly; each render pass the host takes an
//! [`AccordionContext`] snapshot with [`Accordion::context`] and passes it to
//! the section, header and panel it builds.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_accordion::{Accordion, AccordionConfig, Document, Section, SectionConfig};
//!
//! let document = Arc::new(Document::new());
//! let accordion = Accordion::new(AccordionConfig::default(), document);
//!
//! let context = accordion.context();
//! let shipping = Section::new(&context, SectionConfig::new());
//! let returns = Section::new(&context, SectionConfig::new().with_default_expanded(true));
//! shipping.mount();
//! returns.mount();
//!
//! accordion.expand_all_sections();
//! assert!(shipping.is_expanded() && returns.is_expanded());
//!
//! accordion.collapse_all_sections();
//! assert!(!shipping.is_expanded() && !returns.is_expanded());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use horizon_accordion_core::logging::{span_names, targets};
use horizon_accordion_core::{next_accordion_id, Property, SectionIdGenerator, Signal};

use crate::config::AccordionConfig;
use crate::events::{EventHandler, InputEvent};
use crate::navigation::HeaderNavigator;
use crate::registry::{Command, SectionEntry, SectionRegistry};
use crate::surface::{ElementId, RenderSurface};

/// Panels carry the `region` landmark role only while the accordion has at
/// most this many sections.
pub const MAX_REGION_SECTIONS: usize = 6;

/// Whether an accordion with `section_count` sections suppresses the
/// `region` role on its panels.
pub fn region_role_disabled(section_count: usize) -> bool {
    section_count > MAX_REGION_SECTIONS
}

pub(crate) struct AccordionShared {
    id: String,
    section_ids: SectionIdGenerator,
    registry: Mutex<SectionRegistry>,
    wrap_header_navigation: Property<bool>,
    surface: Arc<dyn RenderSurface>,
    sections_changed: Signal<usize>,
}

impl AccordionShared {
    fn header_marker(&self) -> String {
        format!("{}-header", self.id)
    }

    fn section_marker(&self) -> String {
        format!("{}-section", self.id)
    }

    fn section_count(&self) -> usize {
        self.registry.lock().len()
    }

    fn add_section(&self, id: &str, expand: Command, collapse: Command) -> bool {
        let count = {
            let mut registry = self.registry.lock();
            if !registry.add(SectionEntry::new(id, expand, collapse)) {
                tracing::trace!(target: targets::REGISTRY, section = id, "already registered");
                return false;
            }
            registry.len()
        };

        tracing::debug!(target: targets::REGISTRY, accordion = %self.id, section = id, count, "section added");
        self.sections_changed.emit(count);
        true
    }

    fn remove_section(&self, id: &str) -> bool {
        let count = {
            let mut registry = self.registry.lock();
            if !registry.remove(id) {
                tracing::trace!(target: targets::REGISTRY, section = id, "not registered");
                return false;
            }
            registry.len()
        };

        tracing::debug!(target: targets::REGISTRY, accordion = %self.id, section = id, count, "section removed");
        self.sections_changed.emit(count);
        true
    }

    /// Run every registered section's expand or collapse command.
    ///
    /// Commands run against a snapshot with the registry unlocked, so a
    /// command may mount or unmount sections.
    fn run_all(&self, expand: bool) {
        let entries: Vec<SectionEntry> = self.registry.lock().entries().to_vec();

        let _span = tracing::debug_span!(
            target: targets::ACCORDION,
            span_names::BULK_TOGGLE,
            accordion = %self.id,
            expand,
            count = entries.len(),
        )
        .entered();

        for entry in &entries {
            if expand {
                entry.expand();
            } else {
                entry.collapse();
            }
        }
    }

    fn navigator(&self) -> HeaderNavigator {
        HeaderNavigator::new(
            self.surface.clone(),
            self.header_marker(),
            self.wrap_header_navigation.get(),
        )
    }
}

/// An accordion: the parent controller of a set of sections.
///
/// `Accordion` is a cheap handle; clones share the same state.
#[derive(Clone)]
pub struct Accordion {
    shared: Arc<AccordionShared>,
}

impl Accordion {
    /// Create an accordion that renders onto `surface`.
    ///
    /// The accordion id is allocated here, once.
    pub fn new(config: AccordionConfig, surface: Arc<dyn RenderSurface>) -> Self {
        let id = next_accordion_id();
        tracing::debug!(target: targets::ACCORDION, accordion = %id, ?config, "accordion created");

        Self {
            shared: Arc::new(AccordionShared {
                id,
                section_ids: SectionIdGenerator::new(),
                registry: Mutex::new(SectionRegistry::new()),
                wrap_header_navigation: Property::new(config.wrap_header_navigation),
                surface,
                sections_changed: Signal::new(),
            }),
        }
    }

    /// The accordion id, `"accordion-{n}"`.
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    /// The current configuration.
    pub fn config(&self) -> AccordionConfig {
        AccordionConfig {
            wrap_header_navigation: self.shared.wrap_header_navigation.get(),
        }
    }

    /// Whether arrow-key navigation wraps around.
    pub fn wrap_header_navigation(&self) -> bool {
        self.shared.wrap_header_navigation.get()
    }

    /// Change whether arrow-key navigation wraps around.
    pub fn set_wrap_header_navigation(&self, wrap: bool) {
        self.shared.wrap_header_navigation.set(wrap);
    }

    /// Number of registered sections.
    pub fn section_count(&self) -> usize {
        self.shared.section_count()
    }

    /// Registered section ids, in registration order.
    pub fn section_ids(&self) -> Vec<String> {
        self.shared.registry.lock().ids()
    }

    /// Whether panels currently omit the `region` role.
    pub fn disable_region_role(&self) -> bool {
        region_role_disabled(self.section_count())
    }

    /// Expand every registered section.
    pub fn expand_all_sections(&self) {
        self.shared.run_all(true);
    }

    /// Collapse every registered section.
    pub fn collapse_all_sections(&self) {
        self.shared.run_all(false);
    }

    /// Bulk commands for the host, e.g. to bind to "expand all" buttons.
    pub fn controls(&self) -> AccordionControls {
        AccordionControls {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Take the context snapshot for one render pass.
    pub fn context(&self) -> AccordionContext {
        AccordionContext {
            accordion_id: self.shared.id.clone(),
            disable_region_role: self.disable_region_role(),
            shared: self.shared.clone(),
        }
    }

    /// Emitted with the new section count whenever a section registers or
    /// deregisters.
    pub fn sections_changed(&self) -> &Signal<usize> {
        &self.shared.sections_changed
    }

    /// The marker value carried by this accordion's headers.
    pub fn header_marker(&self) -> String {
        self.shared.header_marker()
    }

    /// The live header list on the rendering surface, in document order.
    pub fn live_headers(&self) -> Vec<ElementId> {
        self.shared.navigator().live_headers()
    }

    /// Handle a key-down event on one of this accordion's headers.
    ///
    /// Returns the header that received focus, if focus moved.
    pub fn handle_header_key_down(&self, event: &mut InputEvent) -> Option<ElementId> {
        self.shared.navigator().handle_key_down(event)
    }
}

/// Bulk expand/collapse commands detached from the accordion handle.
///
/// Commands become no-ops once the accordion is gone.
#[derive(Clone)]
pub struct AccordionControls {
    shared: Weak<AccordionShared>,
}

impl AccordionControls {
    /// Expand every registered section.
    pub fn expand_all_sections(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.run_all(true);
        }
    }

    /// Collapse every registered section.
    pub fn collapse_all_sections(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.run_all(false);
        }
    }

    /// [`expand_all_sections`](Self::expand_all_sections) as a command.
    pub fn expand_all_command(&self) -> Command {
        let controls = self.clone();
        Arc::new(move || controls.expand_all_sections())
    }

    /// [`collapse_all_sections`](Self::collapse_all_sections) as a command.
    pub fn collapse_all_command(&self) -> Command {
        let controls = self.clone();
        Arc::new(move || controls.collapse_all_sections())
    }
}

/// What an accordion shares with its sections, headers and panels during
/// one render pass.
///
/// The id and the region policy are captured when the snapshot is taken;
/// the registry mutators and key dispatch always act on live state.
#[derive(Clone)]
pub struct AccordionContext {
    accordion_id: String,
    disable_region_role: bool,
    shared: Arc<AccordionShared>,
}

impl AccordionContext {
    /// The accordion id.
    pub fn accordion_id(&self) -> &str {
        &self.accordion_id
    }

    /// Whether panels omit the `region` role in this render pass.
    pub fn disable_region_role(&self) -> bool {
        self.disable_region_role
    }

    /// Marker value identifying this accordion's headers.
    pub fn header_marker(&self) -> String {
        self.shared.header_marker()
    }

    /// Marker value identifying this accordion's section roots.
    pub fn section_marker(&self) -> String {
        self.shared.section_marker()
    }

    /// Allocate the next section id, `"{accordion_id}-section-{n}"`.
    pub fn next_section_id(&self) -> String {
        self.shared.section_ids.next_id(&self.shared.id)
    }

    /// Register a section. No-op returning `false` for a duplicate id.
    pub fn add_section(&self, id: &str, expand: Command, collapse: Command) -> bool {
        self.shared.add_section(id, expand, collapse)
    }

    /// Deregister a section. No-op returning `false` for an unknown id.
    pub fn remove_section(&self, id: &str) -> bool {
        self.shared.remove_section(id)
    }

    /// Handle a key-down event on one of this accordion's headers.
    pub fn handle_header_key_down(&self, event: &mut InputEvent) -> Option<ElementId> {
        self.shared.navigator().handle_key_down(event)
    }

    /// The key-down dispatcher as a bindable handler.
    ///
    /// The handler holds the accordion weakly, so a surface storing it does
    /// not keep the accordion alive.
    pub fn key_down_handler(&self) -> EventHandler {
        let shared = Arc::downgrade(&self.shared);
        Arc::new(move |event: &mut InputEvent| {
            if let Some(shared) = shared.upgrade() {
                shared.navigator().handle_key_down(event);
            }
        })
    }
}

impl fmt::Debug for Accordion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accordion")
            .field("id", &self.shared.id)
            .field("sections", &self.section_ids())
            .field("wrap_header_navigation", &self.wrap_header_navigation())
            .finish()
    }
}

impl fmt::Debug for AccordionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionContext")
            .field("accordion_id", &self.accordion_id)
            .field("disable_region_role", &self.disable_region_role)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Accordion: Send, Sync);
static_assertions::assert_impl_all!(AccordionContext: Send, Sync);
