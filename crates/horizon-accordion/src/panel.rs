//! Section panels.

use horizon_accordion_core::logging::targets;

use crate::accordion::AccordionContext;
use crate::attributes::{names, AttrBag};
use crate::section::SectionContext;

/// The collapsible content region of one section.
#[derive(Debug, Clone)]
pub struct Panel {
    disable_region_role: bool,
    section: SectionContext,
}

impl Panel {
    pub fn new(accordion: &AccordionContext, section: &SectionContext) -> Self {
        Self {
            disable_region_role: accordion.disable_region_role(),
            section: section.clone(),
        }
    }

    /// Id of the panel element, `"{section_id}-panel"`.
    pub fn id(&self) -> String {
        self.section.panel_id()
    }

    /// Expansion as of this render pass.
    pub fn is_expanded(&self) -> bool {
        self.section.is_expanded()
    }

    /// Attributes for the panel element.
    ///
    /// A collapsed panel carries `aria-hidden` and `hidden`; an expanded one
    /// carries neither, even if the base bag did. The `region` role is
    /// dropped once the accordion has more than
    /// [`MAX_REGION_SECTIONS`](crate::accordion::MAX_REGION_SECTIONS) sections.
    pub fn panel_props(&self, base: AttrBag) -> AttrBag {
        let mut bag = base;
        let hidden = (!self.is_expanded()).then_some(true);

        tracing::trace!(
            target: targets::SECTION,
            section = self.section.section_id(),
            hidden = hidden.is_some(),
            region = !self.disable_region_role,
            "panel props"
        );

        bag.set(names::ID, self.id());
        bag.set_opt(names::ROLE, (!self.disable_region_role).then_some("region"));
        bag.set(names::ARIA_LABELLEDBY, self.section.header_id());
        bag.set_opt(names::ARIA_HIDDEN, hidden);
        bag.set_opt(names::HIDDEN, hidden);
        bag
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::accordion::Accordion;
    use crate::attributes::AttrValue;
    use crate::config::{AccordionConfig, SectionConfig};
    use crate::section::Section;
    use crate::surface::Document;

    fn accordion() -> Accordion {
        Accordion::new(AccordionConfig::default(), Arc::new(Document::new()))
    }

    #[test]
    fn test_collapsed_panel_is_hidden() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new());
        section.mount();

        let props = Panel::new(&acc.context(), &section.context()).panel_props(AttrBag::new());

        assert_eq!(props.get_str(names::ID), Some(format!("{}-panel", section.id()).as_str()));
        assert_eq!(props.get_str(names::ROLE), Some("region"));
        assert_eq!(
            props.get_str(names::ARIA_LABELLEDBY),
            Some(format!("{}-header", section.id()).as_str())
        );
        assert_eq!(props.get(names::ARIA_HIDDEN), Some(&AttrValue::Bool(true)));
        assert_eq!(props.get(names::HIDDEN), Some(&AttrValue::Bool(true)));
    }

    #[test]
    fn test_expanded_panel_drops_hidden_from_base() {
        let acc = accordion();
        let section = Section::new(&acc.context(), SectionConfig::new().with_default_expanded(true));
        section.mount();

        let base = AttrBag::new()
            .with(names::HIDDEN, true)
            .with(names::ARIA_HIDDEN, true)
            .with("class", "panel");
        let props = Panel::new(&acc.context(), &section.context()).panel_props(base);

        assert!(!props.contains(names::HIDDEN));
        assert!(!props.contains(names::ARIA_HIDDEN));
        assert_eq!(props.get_str("class"), Some("panel"));
    }

    #[test]
    fn test_region_role_dropped_past_threshold() {
        let acc = accordion();
        let sections: Vec<Section> = (0..7)
            .map(|_| {
                let section = Section::new(&acc.context(), SectionConfig::new());
                section.mount();
                section
            })
            .collect();

        let base = AttrBag::new().with(names::ROLE, "region");
        let props = Panel::new(&acc.context(), &sections[0].context()).panel_props(base);
        assert!(!props.contains(names::ROLE));
    }
}
