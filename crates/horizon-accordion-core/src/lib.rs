//! Core systems for Horizon Accordion.
//!
//! This crate provides the foundational pieces the accordion controllers are
//! built from:
//!
//! - **Identity**: process-wide accordion ids and per-accordion section ids
//! - **Signal/Slot System**: re-entrant change notification
//! - **Property System**: values with change detection
//! - **Logging**: `tracing` targets and span names
//!
//! # Example
//!
//! ```
//! use horizon_accordion_core::{next_accordion_id, SectionIdGenerator};
//!
//! let accordion_id = next_accordion_id();
//! let sections = SectionIdGenerator::new();
//!
//! let first = sections.next_id(&accordion_id);
//! assert_eq!(first, format!("{accordion_id}-section-1"));
//! ```

pub mod id;
pub mod logging;
pub mod property;
pub mod signal;

pub use id::{next_accordion_id, SectionIdGenerator};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
