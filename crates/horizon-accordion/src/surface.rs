//! The rendering surface boundary.
//!
//! The accordion never renders anything itself. It hands attribute bags to a
//! host and needs exactly two things back from whatever displays them:
//!
//! - the live, document-ordered list of elements carrying a marker value, and
//! - a way to move keyboard focus to one of those elements.
//!
//! Those two needs form the [`RenderSurface`] trait. [`Document`] is an
//! in-memory implementation: a small element tree that stores the bags
//! applied to it, tracks focus, and dispatches synthetic input events to the
//! bound handlers. It backs the test suite and the showcase example, and is
//! a reasonable starting point for headless hosts.
//!
//! # Document Order
//!
//! Marker queries walk the tree depth-first, pre-order (parents before
//! children, siblings in order), which matches on-screen order for a normal
//! document. Queries are answered from the current tree on every call; a
//! section removed from the middle and re-inserted elsewhere shows up at its
//! new position immediately.

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use horizon_accordion_core::logging::targets;

use crate::attributes::{names, AttrBag, AttrValue};
use crate::events::{EventHandler, InputEvent, Key};

new_key_type! {
    /// Opaque handle to an element on a rendering surface.
    pub struct ElementId;
}

/// What the accordion needs from the host's rendering surface.
pub trait RenderSurface: Send + Sync {
    /// All connected elements whose marker attribute equals `marker`, in
    /// document order.
    fn query_by_marker(&self, marker: &str) -> Vec<ElementId>;

    /// Move keyboard focus to `element`.
    fn focus(&self, element: ElementId);
}

struct ElementNode {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    bag: AttrBag,
}

impl ElementNode {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            parent: None,
            children: Vec::new(),
            bag: AttrBag::new(),
        }
    }
}

struct Tree {
    nodes: SlotMap<ElementId, ElementNode>,
    root: ElementId,
    focused: Option<ElementId>,
}

impl Tree {
    fn is_connected(&self, mut id: ElementId) -> bool {
        loop {
            if id == self.root {
                return true;
            }
            match self.nodes.get(id).and_then(|node| node.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.nodes.get(id).and_then(|node| node.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|&child| child != id);
        }
    }

    /// Depth-first, pre-order walk from the root.
    fn walk(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().copied());
            }
        }
        out
    }
}

/// An in-memory element tree implementing [`RenderSurface`].
pub struct Document {
    tree: Mutex<Tree>,
}

impl Document {
    /// Create an empty document with a `body` root element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::new("body"));
        Self {
            tree: Mutex::new(Tree {
                nodes,
                root,
                focused: None,
            }),
        }
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.tree.lock().root
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: impl Into<String>) -> ElementId {
        self.tree.lock().nodes.insert(ElementNode::new(tag))
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent` before `reference`.
    ///
    /// When `reference` is `None` or not a child of `parent`, `child` is
    /// appended. Returns `false` (and changes nothing) if either element is
    /// unknown or the move would create a cycle.
    pub fn insert_before(
        &self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> bool {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(parent)
            || !tree.nodes.contains_key(child)
            || tree.is_ancestor_or_self(child, parent)
        {
            return false;
        }

        tree.detach(child);

        let Some(parent_node) = tree.nodes.get_mut(parent) else {
            return false;
        };
        let position = reference
            .and_then(|reference| parent_node.children.iter().position(|&c| c == reference))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(position, child);

        if let Some(child_node) = tree.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
        true
    }

    /// Detach an element (and its subtree) from its parent without
    /// destroying it, so it can be inserted again later.
    pub fn detach(&self, element: ElementId) -> bool {
        let mut tree = self.tree.lock();
        if element == tree.root || !tree.nodes.contains_key(element) {
            return false;
        }
        tree.detach(element);
        if let Some(focused) = tree.focused {
            if tree.is_ancestor_or_self(element, focused) {
                tree.focused = None;
            }
        }
        true
    }

    /// Remove an element and destroy its whole subtree.
    pub fn remove(&self, element: ElementId) -> bool {
        let mut tree = self.tree.lock();
        if element == tree.root || !tree.nodes.contains_key(element) {
            return false;
        }
        tree.detach(element);
        for id in tree.subtree(element) {
            if tree.focused == Some(id) {
                tree.focused = None;
            }
            tree.nodes.remove(id);
        }
        true
    }

    /// Whether `element` exists in this document (attached or not).
    pub fn contains(&self, element: ElementId) -> bool {
        self.tree.lock().nodes.contains_key(element)
    }

    /// Whether `element` is reachable from the root.
    pub fn is_connected(&self, element: ElementId) -> bool {
        let tree = self.tree.lock();
        tree.nodes.contains_key(element) && tree.is_connected(element)
    }

    /// The element's tag name.
    pub fn tag(&self, element: ElementId) -> Option<String> {
        self.tree.lock().nodes.get(element).map(|node| node.tag.clone())
    }

    /// The element's parent, if attached.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.tree.lock().nodes.get(element).and_then(|node| node.parent)
    }

    /// The element's children, in order.
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.tree
            .lock()
            .nodes
            .get(element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Replace the element's attributes and bindings with `bag`.
    pub fn apply(&self, element: ElementId, bag: AttrBag) -> bool {
        match self.tree.lock().nodes.get_mut(element) {
            Some(node) => {
                node.bag = bag;
                true
            }
            None => false,
        }
    }

    /// Read one attribute of an element.
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<AttrValue> {
        self.tree
            .lock()
            .nodes
            .get(element)
            .and_then(|node| node.bag.get(name).cloned())
    }

    /// All connected elements whose attribute `name` equals `value`, in
    /// document order.
    pub fn query_by_attribute(&self, name: &str, value: &str) -> Vec<ElementId> {
        let tree = self.tree.lock();
        tree.walk()
            .into_iter()
            .filter(|&id| {
                tree.nodes
                    .get(id)
                    .and_then(|node| node.bag.get_str(name))
                    .is_some_and(|v| v == value)
            })
            .collect()
    }

    /// The element holding keyboard focus.
    pub fn focused(&self) -> Option<ElementId> {
        self.tree.lock().focused
    }

    /// Dispatch a click to `target`.
    pub fn click(&self, target: ElementId) -> InputEvent {
        self.dispatch(InputEvent::click(target))
    }

    /// Dispatch a key-down to `target`.
    pub fn key_down(&self, target: ElementId, key: Key) -> InputEvent {
        self.dispatch(InputEvent::key_down(target, key))
    }

    /// Dispatch a key-press to `target`.
    pub fn key_press(&self, target: ElementId, key: Key) -> InputEvent {
        self.dispatch(InputEvent::key_press(target, key))
    }

    /// Dispatch an event and return it.
    ///
    /// The event bubbles: the handler bound on the target runs first, then
    /// those bound on each ancestor up to the root, with `current_target`
    /// set to the element whose handler is running. Handlers run without
    /// the document lock held, so they may query the document, move focus,
    /// or mutate the tree.
    pub fn dispatch(&self, mut event: InputEvent) -> InputEvent {
        let path: Vec<(ElementId, EventHandler)> = {
            let tree = self.tree.lock();
            let mut path = Vec::new();
            let mut next = Some(event.target);
            while let Some(id) = next {
                let Some(node) = tree.nodes.get(id) else {
                    break;
                };
                if let Some(handler) = node.bag.handler(event.kind) {
                    path.push((id, handler));
                }
                next = node.parent;
            }
            path
        };

        if path.is_empty() {
            tracing::trace!(
                target: targets::SURFACE,
                event = event.kind.dom_name(),
                "no handler bound"
            );
        }
        for (element, handler) in path {
            event.current_target = element;
            handler(&mut event);
        }
        event
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for Document {
    fn query_by_marker(&self, marker: &str) -> Vec<ElementId> {
        self.query_by_attribute(names::ACCORDION_ID_TYPE, marker)
    }

    fn focus(&self, element: ElementId) {
        let mut tree = self.tree.lock();
        if tree.nodes.contains_key(element) && tree.is_connected(element) {
            tree.focused = Some(element);
            tracing::debug!(target: targets::SURFACE, ?element, "focus moved");
        } else {
            tracing::trace!(target: targets::SURFACE, ?element, "ignoring focus on detached element");
        }
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::events::EventKind;

    fn marked(doc: &Document, marker: &str) -> ElementId {
        let el = doc.create_element("div");
        doc.apply(el, AttrBag::new().with(names::ACCORDION_ID_TYPE, marker));
        el
    }

    #[test]
    fn test_query_follows_document_order() {
        let doc = Document::new();
        let outer = doc.create_element("div");
        let a = marked(&doc, "m");
        let b = marked(&doc, "m");
        let c = marked(&doc, "m");
        doc.append_child(doc.root(), outer);
        doc.append_child(outer, a);
        doc.append_child(doc.root(), c);
        doc.insert_before(outer, b, Some(a));

        assert_eq!(doc.query_by_marker("m"), vec![b, a, c]);
    }

    #[test]
    fn test_detached_elements_are_not_live() {
        let doc = Document::new();
        let a = marked(&doc, "m");
        let b = marked(&doc, "m");
        doc.append_child(doc.root(), a);

        assert_eq!(doc.query_by_marker("m"), vec![a]);
        assert!(!doc.is_connected(b));

        doc.append_child(doc.root(), b);
        doc.detach(a);
        assert_eq!(doc.query_by_marker("m"), vec![b]);

        doc.append_child(doc.root(), a);
        assert_eq!(doc.query_by_marker("m"), vec![b, a]);
    }

    #[test]
    fn test_cycles_are_refused() {
        let doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(doc.root(), parent);
        doc.append_child(parent, child);

        assert!(!doc.append_child(child, parent));
        assert!(!doc.append_child(parent, parent));
        assert_eq!(doc.parent(child), Some(parent));
    }

    #[test]
    fn test_remove_destroys_subtree_and_clears_focus() {
        let doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("button");
        doc.append_child(doc.root(), parent);
        doc.append_child(parent, child);
        doc.focus(child);
        assert_eq!(doc.focused(), Some(child));

        assert!(doc.remove(parent));
        assert!(!doc.contains(child));
        assert_eq!(doc.focused(), None);
        assert!(!doc.remove(doc.root()));
    }

    #[test]
    fn test_focus_ignores_detached_elements() {
        let doc = Document::new();
        let el = doc.create_element("div");
        doc.focus(el);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_dispatch_invokes_bound_handler() {
        let doc = Arc::new(Document::new());
        let el = doc.create_element("div");
        doc.append_child(doc.root(), el);

        let clicks = Arc::new(AtomicUsize::new(0));
        let clicks_clone = clicks.clone();
        let weak = Arc::downgrade(&doc);
        doc.apply(
            el,
            AttrBag::new().on(EventKind::Click, move |event| {
                clicks_clone.fetch_add(1, Ordering::SeqCst);
                // Handlers run unlocked and may use the document.
                if let Some(doc) = weak.upgrade() {
                    doc.focus(event.target);
                }
            }),
        );

        doc.click(el);
        let event = doc.key_down(el, Key::Enter);

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(doc.focused(), Some(el));
        assert!(!event.is_default_prevented());
        assert_eq!(doc.tag(el).as_deref(), Some("div"));
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let doc = Document::new();
        let outer = doc.create_element("div");
        let button = doc.create_element("button");
        let label = doc.create_element("span");
        doc.append_child(doc.root(), outer);
        doc.append_child(outer, button);
        doc.append_child(button, label);

        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        for el in [outer, button] {
            let seen = seen.clone();
            doc.apply(
                el,
                AttrBag::new().on(EventKind::KeyDown, move |event| {
                    seen.lock().push((event.target, event.current_target));
                }),
            );
        }

        let event = doc.key_down(label, Key::ArrowDown);

        assert_eq!(*seen.lock(), vec![(label, button), (label, outer)]);
        assert_eq!(event.target, label);
    }
}
