//! Accordion sections.
//!
//! A [`Section`] owns one section's expansion state. It registers with its
//! accordion on [`mount`](Section::mount) and deregisters on
//! [`unmount`](Section::unmount) or when the last handle is dropped.
//!
//! Expansion is either local (uncontrolled) or mirrored from a value the host
//! supplies (controlled). In controlled mode a toggle only notifies the
//! `on_toggle` callback; the host decides whether to feed a new value back
//! through [`Section::set_expanded`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use horizon_accordion_core::logging::targets;
use horizon_accordion_core::{Property, Signal};

use crate::accordion::AccordionContext;
use crate::attributes::{names, AttrBag};
use crate::config::SectionConfig;

/// Callback receiving the requested expansion state on every toggle.
pub type ToggleCallback = Arc<dyn Fn(bool) + Send + Sync>;

struct SectionShared {
    id: String,
    accordion: AccordionContext,
    local_expanded: Property<bool>,
    controlled: Property<Option<bool>>,
    on_toggle: RwLock<Option<ToggleCallback>>,
    mounted: AtomicBool,
    expanded_changed: Signal<bool>,
}

impl SectionShared {
    fn is_expanded(&self) -> bool {
        self.controlled
            .get()
            .unwrap_or_else(|| self.local_expanded.get())
    }

    fn toggle(&self, next: bool) {
        let on_toggle = self.on_toggle.read().clone();
        if let Some(on_toggle) = on_toggle {
            on_toggle(next);
        }

        // A controlled value only changes through `set_expanded`, which
        // emits on its own.
        if self.controlled.get().is_some() {
            tracing::trace!(target: targets::SECTION, section = %self.id, next, "controlled toggle");
            return;
        }

        tracing::trace!(target: targets::SECTION, section = %self.id, next, "toggle");
        if self.local_expanded.set(next) {
            self.expanded_changed.emit(next);
        }
    }

    fn expand(&self) {
        if !self.is_expanded() {
            self.toggle(true);
        }
    }

    fn collapse(&self) {
        if self.is_expanded() {
            self.toggle(false);
        }
    }

    fn unmount(&self) -> bool {
        if !self.mounted.swap(false, Ordering::SeqCst) {
            return false;
        }
        tracing::debug!(target: targets::SECTION, section = %self.id, "unmount");
        self.accordion.remove_section(&self.id);
        true
    }
}

impl Drop for SectionShared {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// One collapsible section of an accordion.
///
/// `Section` is a cheap handle; clones share the same state.
#[derive(Clone)]
pub struct Section {
    shared: Arc<SectionShared>,
}

impl Section {
    /// Create a section under `accordion`.
    ///
    /// The section id is allocated here and kept for the section's lifetime.
    /// The section is not registered until [`mount`](Self::mount).
    pub fn new(accordion: &AccordionContext, config: SectionConfig) -> Self {
        let id = accordion.next_section_id();
        tracing::debug!(target: targets::SECTION, section = %id, ?config, "section created");

        Self {
            shared: Arc::new(SectionShared {
                id,
                accordion: accordion.clone(),
                local_expanded: Property::new(config.default_expanded),
                controlled: Property::new(config.expanded),
                on_toggle: RwLock::new(config.on_toggle),
                mounted: AtomicBool::new(false),
                expanded_changed: Signal::new(),
            }),
        }
    }

    /// The section id, `"{accordion_id}-section-{n}"`.
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    /// The owning accordion's id.
    pub fn accordion_id(&self) -> &str {
        self.shared.accordion.accordion_id()
    }

    /// Register with the accordion.
    ///
    /// Returns `false` if already mounted.
    pub fn mount(&self) -> bool {
        if self.shared.mounted.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::debug!(target: targets::SECTION, section = %self.shared.id, "mount");

        let expand_target = Arc::downgrade(&self.shared);
        let collapse_target = expand_target.clone();
        self.shared.accordion.add_section(
            &self.shared.id,
            Arc::new(move || {
                if let Some(section) = expand_target.upgrade() {
                    section.expand();
                }
            }),
            Arc::new(move || {
                if let Some(section) = collapse_target.upgrade() {
                    section.collapse();
                }
            }),
        )
    }

    /// Deregister from the accordion.
    ///
    /// Returns `false` if not mounted.
    pub fn unmount(&self) -> bool {
        self.shared.unmount()
    }

    /// Whether the section is registered with its accordion.
    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.load(Ordering::SeqCst)
    }

    /// The effective expansion: the controlled value if set, else local state.
    pub fn is_expanded(&self) -> bool {
        self.shared.is_expanded()
    }

    /// Whether expansion is controlled by the host.
    pub fn is_controlled(&self) -> bool {
        self.shared.controlled.get().is_some()
    }

    /// Set or clear the controlled expansion.
    ///
    /// Clearing it returns the section to its local state, which controlled
    /// toggles never touched.
    pub fn set_expanded(&self, expanded: Option<bool>) {
        let before = self.shared.is_expanded();
        self.shared.controlled.set(expanded);
        let after = self.shared.is_expanded();
        if after != before {
            self.shared.expanded_changed.emit(after);
        }
    }

    /// Replace the toggle notification callback.
    pub fn set_on_toggle(&self, on_toggle: Option<ToggleCallback>) {
        *self.shared.on_toggle.write() = on_toggle;
    }

    /// Request the expansion state `next`.
    ///
    /// Notifies `on_toggle` first, then updates local state unless controlled.
    pub fn toggle(&self, next: bool) {
        self.shared.toggle(next);
    }

    /// Toggle to expanded if currently collapsed.
    pub fn expand(&self) {
        self.shared.expand();
    }

    /// Toggle to collapsed if currently expanded.
    pub fn collapse(&self) {
        self.shared.collapse();
    }

    /// Take the context snapshot for one render pass.
    pub fn context(&self) -> SectionContext {
        SectionContext {
            section_id: self.shared.id.clone(),
            expanded: self.shared.is_expanded(),
            section: Arc::downgrade(&self.shared),
        }
    }

    /// Attributes for the section root element: the base bag plus the
    /// accordion's section marker.
    pub fn section_props(&self, base: AttrBag) -> AttrBag {
        base.with(names::ACCORDION_ID_TYPE, self.shared.accordion.section_marker())
    }

    /// Emitted with the new effective expansion whenever it changes.
    pub fn expanded_changed(&self) -> &Signal<bool> {
        &self.shared.expanded_changed
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.shared.id)
            .field("expanded", &self.is_expanded())
            .field("controlled", &self.is_controlled())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

/// What a section shares with its header and panel during one render pass.
///
/// `is_expanded` is the value at the time the snapshot was taken. The toggle
/// reaches the live section, and does nothing once it is gone.
#[derive(Clone)]
pub struct SectionContext {
    section_id: String,
    expanded: bool,
    section: Weak<SectionShared>,
}

impl SectionContext {
    /// The section id.
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Expansion as of this render pass.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Expansion right now, falling back to the snapshot if the section is gone.
    pub fn current_expanded(&self) -> bool {
        self.section
            .upgrade()
            .map_or(self.expanded, |section| section.is_expanded())
    }

    /// Id of the section's header toggle, `"{section_id}-header"`.
    pub fn header_id(&self) -> String {
        format!("{}-header", self.section_id)
    }

    /// Id of the section's panel, `"{section_id}-panel"`.
    pub fn panel_id(&self) -> String {
        format!("{}-panel", self.section_id)
    }

    /// Request the expansion state `next` on the live section.
    pub fn toggle(&self, next: bool) {
        if let Some(section) = self.section.upgrade() {
            section.toggle(next);
        }
    }
}

impl fmt::Debug for SectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionContext")
            .field("section_id", &self.section_id)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Section: Send, Sync);
static_assertions::assert_impl_all!(SectionContext: Send, Sync);

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::accordion::Accordion;
    use crate::config::AccordionConfig;
    use crate::surface::Document;

    fn accordion() -> Accordion {
        Accordion::new(AccordionConfig::default(), Arc::new(Document::new()))
    }

    #[test]
    fn test_uncontrolled_toggle() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        assert!(!section.is_expanded());

        section.toggle(true);
        assert!(section.is_expanded());
        section.toggle(false);
        assert!(!section.is_expanded());
    }

    #[test]
    fn test_default_expanded() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new().with_default_expanded(true));
        assert!(section.is_expanded());
        assert!(!section.is_controlled());
    }

    #[test]
    fn test_controlled_toggle_only_notifies() {
        let acc = accordion();
        let requested = Arc::new(Mutex::new(Vec::new()));
        let requested_clone = requested.clone();
        let section = Section::new(
            &acc.context(),
            SectionConfig::new()
                .with_expanded(true)
                .with_on_toggle(move |next| requested_clone.lock().push(next)),
        );

        section.toggle(false);
        assert!(section.is_expanded());
        assert_eq!(*requested.lock(), vec![false]);

        section.set_expanded(Some(false));
        assert!(!section.is_expanded());
    }

    #[test]
    fn test_release_control_restores_local_state() {
        let acc = accordion();
        let section = Section::new(
            &acc.context(),
            SectionConfig::new().with_default_expanded(true).with_expanded(false),
        );
        section.toggle(true);
        assert!(!section.is_expanded());

        section.set_expanded(None);
        assert!(section.is_expanded());
    }

    #[test]
    fn test_expand_collapse_are_idempotent() {
        let acc = accordion();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let section = Section::new(
            &acc.context(),
            SectionConfig::new().with_on_toggle(move |next| calls_clone.lock().push(next)),
        );

        section.expand();
        section.expand();
        section.collapse();
        section.collapse();

        assert_eq!(*calls.lock(), vec![true, false]);
    }

    #[test]
    fn test_expanded_changed_fires_on_change_only() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        section.expanded_changed().connect(move |&expanded| seen_clone.lock().push(expanded));

        section.toggle(true);
        section.toggle(true);
        section.set_expanded(Some(true));
        section.set_expanded(Some(false));
        section.set_expanded(None);

        assert_eq!(*seen.lock(), vec![true, false, true]);
    }

    #[test]
    fn test_mount_unmount_idempotent() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        assert!(!section.is_mounted());
        assert_eq!(acc.section_count(), 0);

        assert!(section.mount());
        assert!(!section.mount());
        assert_eq!(acc.section_ids(), vec![section.id().to_string()]);

        assert!(section.unmount());
        assert!(!section.unmount());
        assert_eq!(acc.section_count(), 0);
    }

    #[test]
    fn test_drop_deregisters() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        section.mount();
        let clone = section.clone();

        drop(section);
        assert_eq!(acc.section_count(), 1);
        drop(clone);
        assert_eq!(acc.section_count(), 0);
    }

    #[test]
    fn test_context_snapshot_and_ids() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        let ctx = section.context();

        assert_eq!(ctx.header_id(), format!("{}-header", section.id()));
        assert_eq!(ctx.panel_id(), format!("{}-panel", section.id()));

        ctx.toggle(true);
        assert!(!ctx.is_expanded());
        assert!(ctx.current_expanded());
        assert!(section.context().is_expanded());

        drop(section);
        ctx.toggle(false);
        assert_eq!(ctx.current_expanded(), ctx.is_expanded());
    }

    #[test]
    fn test_section_props() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        let props = section.section_props(AttrBag::new().with(names::ID, "faq-root").with("class", "faq"));

        assert_eq!(props.get_str(names::ID), Some("faq-root"));
        assert_eq!(
            props.get_str(names::ACCORDION_ID_TYPE),
            Some(format!("{}-section", acc.id()).as_str())
        );
        assert_eq!(props.get_str("class"), Some("faq"));

        let bare = section.section_props(AttrBag::new());
        assert!(!bare.contains(names::ID));
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_controlled_feedback_emits_once() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new().with_expanded(true));
        let host = section.clone();
        section.set_on_toggle(Some(Arc::new(move |next| host.set_expanded(Some(next)))));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        section.expanded_changed().connect(move |&expanded| seen_clone.lock().push(expanded));

        section.toggle(false);
        assert!(!section.is_expanded());
        section.toggle(true);
        assert!(section.is_expanded());

        assert_eq!(*seen.lock(), vec![false, true]);
        section.set_on_toggle(None);
    }
}
