//! Identity generation for accordions and their sections.
//!
//! Accordion ids come from one process-wide counter so that two accordions
//! rendered on the same surface never share element ids or marker values.
//! Section numbers come from a counter owned by each accordion instance.
//! Neither counter is ever reset, and a number handed out for a section
//! that is later removed is never reused.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

static NEXT_ACCORDION: AtomicU64 = AtomicU64::new(1);

/// Allocate the next process-wide accordion id, `"accordion-{n}"`.
///
/// `n` starts at 1 and increments on every call.
pub fn next_accordion_id() -> String {
    let n = NEXT_ACCORDION.fetch_add(1, Ordering::Relaxed);
    tracing::trace!(target: targets::CORE, n, "accordion id allocated");
    format!("accordion-{n}")
}

/// Per-accordion counter for section numbers.
#[derive(Debug)]
pub struct SectionIdGenerator {
    next: AtomicU64,
}

impl SectionIdGenerator {
    /// Create a generator whose first number is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Return the next section number.
    pub fn next_number(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Return the next section id for the accordion `accordion_id`,
    /// `"{accordion_id}-section-{n}"`.
    pub fn next_id(&self, accordion_id: &str) -> String {
        format!("{accordion_id}-section-{}", self.next_number())
    }
}

impl Default for SectionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(id: &str) -> u64 {
        id.trim_start_matches("accordion-").parse().unwrap()
    }

    #[test]
    fn test_accordion_ids_strictly_increase() {
        let first = next_accordion_id();
        let second = next_accordion_id();

        assert!(first.starts_with("accordion-"));
        assert!(suffix(&second) > suffix(&first));
    }

    #[test]
    fn test_section_numbers_start_at_one() {
        let ids = SectionIdGenerator::new();
        assert_eq!(ids.next_number(), 1);
        assert_eq!(ids.next_number(), 2);
        assert_eq!(ids.next_id("accordion-9"), "accordion-9-section-3");
    }

    #[test]
    fn test_generators_are_independent() {
        let a = SectionIdGenerator::new();
        let b = SectionIdGenerator::default();
        a.next_number();
        a.next_number();
        assert_eq!(b.next_number(), 1);
    }
}
