//! Logging facilities for Horizon Accordion.
//!
//! Horizon Accordion uses the `tracing` crate for instrumentation. Library
//! code never installs a subscriber; to see logs, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_accordion=debug")
//!     .init();
//! ```
//!
//! Registry mutations and focus moves are logged at `debug`. Paths that
//! deliberately do nothing (duplicate registration, removing an unknown
//! section, toggling a disabled header, navigating past an end without
//! wrap) are logged at `trace`.

/// Span names used throughout Horizon Accordion for tracing.
pub mod span_names {
    /// Bulk expand/collapse span.
    pub const BULK_TOGGLE: &str = "horizon_accordion::bulk_toggle";
    /// Header key-down dispatch span.
    pub const KEY_DISPATCH: &str = "horizon_accordion::key_dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Id allocation target.
    pub const CORE: &str = "horizon_accordion_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_accordion_core::signal";
    /// Accordion controller target.
    pub const ACCORDION: &str = "horizon_accordion::accordion";
    /// Section registry target.
    pub const REGISTRY: &str = "horizon_accordion::registry";
    /// Section controller target.
    pub const SECTION: &str = "horizon_accordion::section";
    /// Header attribute builder target.
    pub const HEADER: &str = "horizon_accordion::header";
    /// Keyboard navigation target.
    pub const NAVIGATION: &str = "horizon_accordion::navigation";
    /// Rendering surface target.
    pub const SURFACE: &str = "horizon_accordion::surface";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_accordion::config";
}
