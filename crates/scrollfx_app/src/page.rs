// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demo portfolio page.
//!
//! Builds the laid-out document the session replays against: four
//! stacked sections with reveal-marked card grids, a couple of
//! parallax- and wave-marked accents, and the background container the
//! engine synthesizes its layers under.

use scrollfx_dom::{Document, DomError, Node, NodeId, Rect};

/// Section height in px
const SECTION_H: f32 = 1000.0;
/// Page width in px
const PAGE_W: f32 = 1280.0;

/// Build the demo document.
pub fn build() -> Result<Document, DomError> {
    let mut doc = Document::new();
    let root = doc.root();

    doc.append(
        root,
        Node::new("div")
            .with_class("background-effects")
            .with_rect(Rect::new(0.0, 0.0, PAGE_W, SECTION_H)),
    )?;

    hero(&mut doc, root)?;
    about(&mut doc, root)?;
    projects(&mut doc, root)?;
    contact(&mut doc, root)?;

    Ok(doc)
}

fn section(doc: &mut Document, root: NodeId, id: &str, index: usize) -> Result<NodeId, DomError> {
    doc.append(
        root,
        Node::new("section")
            .with_attribute("id", id)
            .with_rect(Rect::new(0.0, index as f32 * SECTION_H, PAGE_W, SECTION_H)),
    )
}

fn hero(doc: &mut Document, root: NodeId) -> Result<(), DomError> {
    let hero = section(doc, root, "hero", 0)?;
    doc.append(
        hero,
        Node::new("div")
            .with_class("hero-visual")
            .with_rect(Rect::new(700.0, 200.0, 480.0, 480.0)),
    )?;
    doc.append(
        hero,
        Node::new("div")
            .with_class("hero-accent")
            .with_attribute("data-parallax", "0.3")
            .with_attribute("data-direction", "rotate")
            .with_rect(Rect::new(80.0, 150.0, 120.0, 120.0)),
    )?;
    Ok(())
}

fn about(doc: &mut Document, root: NodeId) -> Result<(), DomError> {
    let about = section(doc, root, "about", 1)?;
    let grid = doc.append(
        about,
        Node::new("div")
            .with_class("scroll-animate")
            .with_rect(Rect::new(100.0, SECTION_H + 300.0, 1080.0, 400.0)),
    )?;
    for i in 0..4 {
        doc.append(
            grid,
            Node::new("div")
                .with_class("stat-card")
                .with_rect(Rect::new(
                    100.0 + i as f32 * 270.0,
                    SECTION_H + 320.0,
                    240.0,
                    200.0,
                )),
        )?;
    }
    doc.append(
        about,
        Node::new("div")
            .with_class("about-accent")
            .with_attribute("data-wave", "")
            .with_attribute("data-wave-amplitude", "14")
            .with_rect(Rect::new(1100.0, SECTION_H + 100.0, 80.0, 80.0)),
    )?;
    Ok(())
}

fn projects(doc: &mut Document, root: NodeId) -> Result<(), DomError> {
    let projects = section(doc, root, "projects", 2)?;
    let grid = doc.append(
        projects,
        Node::new("div")
            .with_class("scroll-animate")
            .with_attribute("data-animation", "slideLeft")
            .with_rect(Rect::new(100.0, 2.0 * SECTION_H + 200.0, 1080.0, 600.0)),
    )?;
    for i in 0..3 {
        let card = doc.append(
            grid,
            Node::new("div")
                .with_class("project-card")
                .with_rect(Rect::new(
                    100.0 + i as f32 * 370.0,
                    2.0 * SECTION_H + 220.0,
                    340.0,
                    420.0,
                )),
        )?;
        doc.append(
            card,
            Node::new("img")
                .with_class("project-image")
                .with_rect(Rect::new(
                    120.0 + i as f32 * 370.0,
                    2.0 * SECTION_H + 240.0,
                    300.0,
                    180.0,
                )),
        )?;
    }
    Ok(())
}

fn contact(doc: &mut Document, root: NodeId) -> Result<(), DomError> {
    let contact = section(doc, root, "contact", 3)?;
    doc.append(
        contact,
        Node::new("div")
            .with_class("scroll-animate")
            .with_attribute("data-animation", "scale")
            .with_rect(Rect::new(340.0, 3.0 * SECTION_H + 300.0, 600.0, 400.0)),
    )?;
    doc.append(
        contact,
        Node::new("div")
            .with_class("contact-accent")
            .with_attribute("data-parallax", "0.6")
            .with_attribute("data-direction", "scale")
            .with_rect(Rect::new(60.0, 3.0 * SECTION_H + 120.0, 100.0, 100.0)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_structure() {
        let doc = build().unwrap();
        assert_eq!(doc.select_tag("section").len(), 4);
        assert_eq!(doc.select_class("scroll-animate").len(), 3);
        assert_eq!(doc.select_attr("data-parallax").len(), 2);
        assert_eq!(doc.select_attr("data-wave").len(), 1);
        assert_eq!(doc.select_class("project-image").len(), 3);
        assert_eq!(doc.scroll_height, 4.0 * SECTION_H);
    }
}
