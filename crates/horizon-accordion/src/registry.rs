//! The section registry.
//!
//! An accordion keeps one [`SectionEntry`] per mounted section: the section's
//! id and the two commands the accordion uses to drive it during bulk
//! expand/collapse. Entries are kept in registration order. That order only
//! matters for the order bulk commands run in; keyboard navigation never
//! reads it (it follows document order on the rendering surface).

use std::fmt;
use std::sync::Arc;

/// A shared, argument-less command.
pub type Command = Arc<dyn Fn() + Send + Sync>;

/// One registered section.
#[derive(Clone)]
pub struct SectionEntry {
    id: String,
    expand: Command,
    collapse: Command,
}

impl SectionEntry {
    /// Create an entry for section `id`.
    pub fn new(id: impl Into<String>, expand: Command, collapse: Command) -> Self {
        Self {
            id: id.into(),
            expand,
            collapse,
        }
    }

    /// The section id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run the section's expand command.
    pub fn expand(&self) {
        (self.expand)();
    }

    /// Run the section's collapse command.
    pub fn collapse(&self) {
        (self.collapse)();
    }
}

impl fmt::Debug for SectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionEntry").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Ordered collection of registered sections.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
}

impl SectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// Returns `false` and leaves the registry untouched if an entry with the
    /// same id is already registered.
    pub fn add(&mut self, entry: SectionEntry) -> bool {
        if self.contains(entry.id()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with `id`, keeping the relative order of the rest.
    ///
    /// Returns `false` if no such entry is registered.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Check whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sections are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id().to_string()).collect()
    }

    /// The registered entries, in registration order.
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }
}
