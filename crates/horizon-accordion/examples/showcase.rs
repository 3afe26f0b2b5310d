//! Horizon Accordion Showcase
//!
//! Builds an FAQ accordion from a TOML document, renders it onto the
//! in-memory document and drives it with synthetic clicks and key presses,
//! printing the markup after each step.
//!
//! Run with: cargo run -p horizon-accordion --example showcase
//! Set RUST_LOG=horizon_accordion=trace to see the library's logs.

use std::sync::Arc;

use horizon_accordion::prelude::*;
use tracing_subscriber::EnvFilter;

const FAQ: &str = r#"
wrap_header_navigation = true

[[sections]]
title = "What is an accordion?"
body = "A vertical stack of headers that each reveal a panel."
default_expanded = true

[[sections]]
title = "Can sections be disabled?"
body = "Yes. A disabled header ignores clicks and activation keys."
header = { disabled = true, heading_level = 3 }

[[sections]]
title = "How does keyboard navigation work?"
body = "Arrow keys move between headers; Home and End jump to the ends."
"#;

struct Row {
    title: String,
    body: String,
    section: Section,
    header: HeaderConfig,
    toggle: ElementId,
    panel: ElementId,
}

fn describe(tag: &str, bag: &AttrBag) -> String {
    let attrs: Vec<String> = bag
        .attributes()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect();
    format!("<{tag} {}>", attrs.join(" "))
}

fn render(document: &Document, accordion: &Accordion, rows: &[Row]) {
    let acx = accordion.context();
    println!("<div id=\"{}\">", accordion.id());
    for row in rows {
        let scx = row.section.context();
        let header = Header::new(&acx, &scx, row.header.clone());
        let panel = Panel::new(&acx, &scx);

        let toggle = header.button_toggle_props(AttrBag::new());
        let content = panel.panel_props(AttrBag::new());
        println!("  {}{}</button>", describe("button", &toggle), row.title);
        println!("  {}{}</div>", describe("div", &content), row.body);

        document.apply(row.toggle, toggle);
        document.apply(row.panel, content);
    }
    println!("</div>\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let faq = AccordionDocument::from_toml_str(FAQ)?;
    let document = Arc::new(Document::new());
    let accordion = Accordion::new(faq.accordion.clone(), document.clone());

    accordion.sections_changed().connect(|count| {
        tracing::info!(count, "sections changed");
    });

    let rows: Vec<Row> = faq
        .sections
        .into_iter()
        .map(|entry| {
            let section = Section::new(&accordion.context(), entry.section);
            section.mount();

            let toggle = document.create_element("button");
            let panel = document.create_element("div");
            document.append_child(document.root(), toggle);
            document.append_child(document.root(), panel);

            Row {
                title: entry.title,
                body: entry.body,
                section,
                header: entry.header,
                toggle,
                panel,
            }
        })
        .collect();

    println!("== Initial render ==");
    render(&document, &accordion, &rows);

    println!("== Click the third header ==");
    document.click(rows[2].toggle);
    render(&document, &accordion, &rows);

    println!("== Click the disabled header ==");
    document.click(rows[1].toggle);
    render(&document, &accordion, &rows);

    println!("== Keyboard: ArrowDown from the last header wraps ==");
    document.focus(rows[2].toggle);
    document.key_down(rows[2].toggle, Key::ArrowDown);
    let focused = document.focused();
    let index = rows.iter().position(|row| Some(row.toggle) == focused);
    println!("focus moved to header {index:?}\n");

    println!("== Collapse all ==");
    accordion.controls().collapse_all_sections();
    render(&document, &accordion, &rows);

    Ok(())
}
