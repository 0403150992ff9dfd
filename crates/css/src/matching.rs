use crate::syntax::{ComplexSelector, Compound, Selector, SelectorList};
use html::{Document, Id};

// Check if an element matches a simple selector
fn matches_simple(doc: &Document, id: Id, selector: &Selector) -> bool {
    match selector {
        Selector::Universal => doc.is_element(id),
        Selector::Type(t) => doc
            .element_name(id)
            .is_some_and(|name| name.eq_ignore_ascii_case(t)),
        Selector::Id(want) => doc.attr(id, "id").is_some_and(|v| v == want),
        Selector::Class(want) => doc.has_class(id, want),
    }
}

fn matches_compound(doc: &Document, id: Id, compound: &Compound) -> bool {
    doc.is_element(id) && compound.parts.iter().all(|s| matches_simple(doc, id, s))
}

// Right-to-left: the subject must match `id`, the remaining compounds must
// match ancestors in order. Greedy matching is exact for descendant-only chains.
fn matches_complex(doc: &Document, id: Id, selector: &ComplexSelector) -> bool {
    let Some((subject, rest)) = selector.compounds.split_last() else {
        return false;
    };
    if !matches_compound(doc, id, subject) {
        return false;
    }
    let mut ancestors = doc.ancestors_inclusive(id).skip(1);
    rest.iter()
        .rev()
        .all(|compound| ancestors.any(|a| matches_compound(doc, a, compound)))
}

impl SelectorList {
    pub fn matches(&self, doc: &Document, id: Id) -> bool {
        self.selectors.iter().any(|s| matches_complex(doc, id, s))
    }

    /// All descendants of `scope` that match, in document order.
    pub fn query_all(&self, doc: &Document, scope: Id) -> Vec<Id> {
        doc.descendants(scope)
            .into_iter()
            .filter(|&id| self.matches(doc, id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_selector_list;
    use html::build::{doc, elem, text};
    use html::{Document, Id};

    // #document(1) > div#host.box(2) > [ul.track(3) > li.slide(4), li(5) ; p.slide(6) > "x"(7)]
    fn fixture() -> Document {
        Document::from_node(&doc(vec![elem(
            "div",
            &[("id", "host"), ("class", "box")],
            vec![
                elem(
                    "ul",
                    &[("class", "track")],
                    vec![
                        elem("li", &[("class", "slide")], vec![]),
                        elem("li", &[], vec![]),
                    ],
                ),
                elem("p", &[("class", "slide")], vec![text("x")]),
            ],
        )]))
    }

    fn query(sel: &str, scope: Id) -> Vec<Id> {
        parse_selector_list(sel)
            .unwrap()
            .query_all(&fixture(), scope)
    }

    #[test]
    fn class_selector_finds_all_in_document_order() {
        assert_eq!(query(".slide", Id(2)), vec![Id(4), Id(6)]);
    }

    #[test]
    fn compound_narrows_by_tag() {
        assert_eq!(query("li.slide", Id(2)), vec![Id(4)]);
        assert_eq!(query("li", Id(2)), vec![Id(4), Id(5)]);
    }

    #[test]
    fn descendant_combinator_checks_ancestors() {
        assert_eq!(query(".track li", Id(2)), vec![Id(4), Id(5)]);
        assert_eq!(query("#host .slide", Id(3)), vec![Id(4)]);
        assert_eq!(query("p li", Id(2)), Vec::<Id>::new());
    }

    #[test]
    fn universal_skips_text_nodes() {
        assert_eq!(query("*", Id(2)), vec![Id(3), Id(4), Id(5), Id(6)]);
    }

    #[test]
    fn scope_itself_is_not_a_candidate() {
        assert_eq!(query(".box", Id(2)), Vec::<Id>::new());
        assert_eq!(query("#host", Id(1)), vec![Id(2)]);
    }

    #[test]
    fn list_matches_any_member() {
        assert_eq!(query("p, .track", Id(2)), vec![Id(3), Id(6)]);
    }
}
