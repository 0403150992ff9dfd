#![allow(dead_code)]

use carousel::markup::ACTIVE_CLASS;
use carousel::{CarouselController, CarouselState};
use html::build::{doc, elem, text};
use html::{Document, Id, Node};

pub fn slide(label: &str) -> Node {
    elem("div", &[("class", "slide")], vec![text(label)])
}

/// `<div id="host"><h2>Title</h2> slides… </div>`; returns the document and the host id.
pub fn gallery(count: usize) -> (Document, Id) {
    let mut children = vec![elem("h2", &[], vec![text("Title")])];
    children.extend((0..count).map(|i| slide(&format!("Slide {i}"))));
    let dom = Document::from_node(&doc(vec![elem("div", &[("id", "host")], children)]));
    let host = dom.children(dom.root())[0];
    (dom, host)
}

/// Two sibling galleries under one body.
pub fn two_galleries(first: usize, second: usize) -> (Document, Id, Id) {
    let slides = |n: usize, prefix: &str| {
        (0..n)
            .map(|i| slide(&format!("{prefix}{i}")))
            .collect::<Vec<_>>()
    };
    let dom = Document::from_node(&doc(vec![elem(
        "body",
        &[],
        vec![
            elem("section", &[("id", "a")], slides(first, "a")),
            elem("section", &[("id", "b")], slides(second, "b")),
        ],
    )]));
    let body = dom.children(dom.root())[0];
    let sections = dom.children(body).to_vec();
    (dom, sections[0], sections[1])
}

pub fn state(ctl: &CarouselController, host: Id) -> &CarouselState {
    ctl.get(host).expect("container should be initialized")
}

pub fn active_indices(dom: &Document, ids: &[Id]) -> Vec<usize> {
    ids.iter()
        .enumerate()
        .filter(|(_, id)| dom.has_class(**id, ACTIVE_CLASS))
        .map(|(i, _)| i)
        .collect()
}

/// Exactly one item and one dot are active, both at the stored position.
pub fn assert_single_active(dom: &Document, ctl: &CarouselController, host: Id) -> usize {
    let state = state(ctl, host);
    let parts = state.parts();
    let items = active_indices(dom, &parts.items);
    let dots = active_indices(dom, &parts.dots);
    assert_eq!(items, vec![state.position()], "active items");
    assert_eq!(dots, vec![state.position()], "active dots");
    state.position()
}
