//! Configuration for accordions, sections and headers.
//!
//! Each controller takes a plain config struct. All of them deserialize with
//! `#[serde(default)]`, so a partial TOML or JSON document fills in the
//! defaults:
//!
//! ```
//! use horizon_accordion::config::AccordionDocument;
//!
//! let doc = AccordionDocument::from_toml_str(r#"
//!     wrap_header_navigation = true
//!
//!     [[sections]]
//!     title = "Shipping"
//!     default_expanded = true
//!
//!     [[sections]]
//!     title = "Returns"
//!     header = { heading_level = 3, disabled = true }
//! "#).unwrap();
//!
//! assert!(doc.accordion.wrap_header_navigation);
//! assert_eq!(doc.sections.len(), 2);
//! assert_eq!(doc.sections[1].header.heading_level, 3);
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use horizon_accordion_core::logging::targets;

use crate::error::{ConfigError, Result};
use crate::section::ToggleCallback;

/// Default heading level for headers.
pub const DEFAULT_HEADING_LEVEL: u8 = 1;

/// Highest heading level ARIA defines.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension: `.json` is JSON, anything else TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let format = ConfigFormat::from_path(path);
    tracing::debug!(target: targets::CONFIG, path = %path.display(), ?format, "loading configuration");
    format.parse(&content)
}

/// Accordion-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    /// Whether arrow-key navigation wraps around at the first/last header.
    pub wrap_header_navigation: bool,
}

impl AccordionConfig {
    /// Create the default configuration (no wrap-around).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether header navigation wraps around.
    pub fn with_wrap_header_navigation(mut self, wrap: bool) -> Self {
        self.wrap_header_navigation = wrap;
        self
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        ConfigFormat::Toml.parse(content)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        ConfigFormat::Json.parse(content)
    }

    /// Load from a file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }
}

/// Section-level configuration.
///
/// Supplying `expanded` puts the section in externally controlled mode: its
/// expansion always mirrors that value and toggling only notifies
/// `on_toggle`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Initial expansion when not externally controlled.
    pub default_expanded: bool,
    /// Externally controlled expansion.
    pub expanded: Option<bool>,
    /// Called with the requested state on every toggle.
    #[serde(skip)]
    pub on_toggle: Option<ToggleCallback>,
}

impl SectionConfig {
    /// Create the default configuration (collapsed, uncontrolled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial expansion.
    pub fn with_default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    /// Control the expansion externally.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    /// Set the toggle notification callback.
    pub fn with_on_toggle<F>(mut self, on_toggle: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = Some(Arc::new(on_toggle));
        self
    }
}

impl fmt::Debug for SectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionConfig")
            .field("default_expanded", &self.default_expanded)
            .field("expanded", &self.expanded)
            .field("on_toggle", &self.on_toggle.is_some())
            .finish()
    }
}

/// Header-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Disables toggling. `None` leaves `aria-disabled` off entirely.
    pub disabled: Option<bool>,
    /// The `aria-level` of the heading wrapper.
    pub heading_level: u8,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            disabled: None,
            heading_level: DEFAULT_HEADING_LEVEL,
        }
    }
}

impl HeaderConfig {
    /// Create the default configuration (enabled, level 1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Set the heading level. Not validated; see [`validate`](Self::validate).
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level;
        self
    }

    /// Whether toggling is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Check that the heading level is within `1..=6`.
    ///
    /// The header builders pass the level through as given; call this when
    /// configuration comes from an untrusted source.
    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_HEADING_LEVEL).contains(&self.heading_level) {
            Ok(())
        } else {
            Err(ConfigError::InvalidHeadingLevel {
                level: self.heading_level,
            })
        }
    }
}

/// One section in an [`AccordionDocument`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDocument {
    /// Header text.
    pub title: String,
    /// Panel text.
    pub body: String,
    #[serde(flatten)]
    pub section: SectionConfig,
    pub header: HeaderConfig,
}

/// A whole accordion described declaratively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionDocument {
    #[serde(flatten)]
    pub accordion: AccordionConfig,
    pub sections: Vec<SectionDocument>,
}

impl AccordionDocument {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: Self = ConfigFormat::Toml.parse(content)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: Self = ConfigFormat::Json.parse(content)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load and validate a document, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let doc: Self = load_file(path.as_ref())?;
        doc.validate()?;
        Ok(doc)
    }

    /// Validate every header.
    pub fn validate(&self) -> Result<()> {
        self.sections
            .iter()
            .try_for_each(|section| section.header.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let accordion = AccordionConfig::default();
        assert!(!accordion.wrap_header_navigation);

        let section = SectionConfig::default();
        assert!(!section.default_expanded);
        assert_eq!(section.expanded, None);
        assert!(section.on_toggle.is_none());

        let header = HeaderConfig::default();
        assert_eq!(header.disabled, None);
        assert_eq!(header.heading_level, 1);
        assert!(!header.is_disabled());
    }

    #[test]
    fn test_partial_toml() {
        let config = AccordionConfig::from_toml_str("wrap_header_navigation = true").unwrap();
        assert!(config.wrap_header_navigation);

        let config = AccordionConfig::from_toml_str("").unwrap();
        assert_eq!(config, AccordionConfig::new());
    }

    #[test]
    fn test_json() {
        let config = AccordionConfig::from_json_str(r#"{"wrap_header_navigation": true}"#).unwrap();
        assert!(config.wrap_header_navigation);

        let doc = AccordionDocument::from_json_str(
            r#"{"sections": [{"title": "A", "expanded": false, "header": {"disabled": false}}]}"#,
        )
        .unwrap();
        assert_eq!(doc.sections[0].section.expanded, Some(false));
        assert_eq!(doc.sections[0].header.disabled, Some(false));
        assert_eq!(doc.sections[0].header.heading_level, 1);
    }

    #[test]
    fn test_parse_errors() {
        let err = AccordionConfig::from_toml_str("wrap_header_navigation = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = AccordionConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_heading_level_validation() {
        assert!(HeaderConfig::new().with_heading_level(6).validate().is_ok());

        let err = HeaderConfig::new().with_heading_level(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeadingLevel { level: 0 }));

        let err = AccordionDocument::from_toml_str(
            r#"
            [[sections]]
            header = { heading_level = 9 }
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid heading level 9: expected 1 through 6");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("accordion.toml");
        std::fs::write(&toml_path, "wrap_header_navigation = true").unwrap();
        assert!(AccordionConfig::load(&toml_path).unwrap().wrap_header_navigation);

        let json_path = dir.path().join("accordion.JSON");
        std::fs::write(&json_path, r#"{"sections": [{"title": "x"}]}"#).unwrap();
        let doc = AccordionDocument::load(&json_path).unwrap();
        assert_eq!(doc.sections[0].title, "x");

        let err = AccordionConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_section_builder() {
        let config = SectionConfig::new()
            .with_default_expanded(true)
            .with_expanded(false)
            .with_on_toggle(|_| {});
        assert!(config.default_expanded);
        assert_eq!(config.expanded, Some(false));
        assert!(format!("{config:?}").contains("on_toggle: true"));
    }
}
