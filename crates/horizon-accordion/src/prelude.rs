//! Prelude module for Horizon Accordion.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_accordion::prelude::*;
//! ```
//!
//! This provides access to:
//! - Controllers (`Accordion`, `Section`, `Header`, `Panel`)
//! - Configuration (`AccordionConfig`, `SectionConfig`, `HeaderConfig`)
//! - Attribute bags and events (`AttrBag`, `InputEvent`, `Key`)
//! - The rendering surface (`RenderSurface`, `Document`)

// ============================================================================
// Controllers
// ============================================================================

pub use crate::accordion::{Accordion, AccordionContext, AccordionControls};
pub use crate::header::{Header, ToggleVariant};
pub use crate::panel::Panel;
pub use crate::section::{Section, SectionContext};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{AccordionConfig, AccordionDocument, HeaderConfig, SectionConfig};
pub use crate::error::ConfigError;

// ============================================================================
// Attributes and Events
// ============================================================================

pub use crate::attributes::{names, AttrBag, AttrValue};
pub use crate::events::{EventKind, InputEvent, Key};

// ============================================================================
// Rendering Surface
// ============================================================================

pub use crate::surface::{Document, ElementId, RenderSurface};

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{Property, Signal};
