//! Click handler registry.
//!
//! Handlers are keyed by `(node, namespace)`. Binding a namespace on a node
//! replaces whatever was bound there before, so repeated binding never stacks
//! duplicate handlers.

use crate::command::Direction;
use crate::state::InstanceId;
use html::{Document, Id};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    NavRight,
    NavLeft,
    Goto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate(Direction),
    Display(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub instance: InstanceId,
    pub action: Action,
}

#[derive(Clone, Debug, Default)]
pub struct EventBindings {
    handlers: HashMap<(Id, Namespace), Binding>,
}

impl EventBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the binding that was replaced, if any.
    pub fn bind(&mut self, node: Id, namespace: Namespace, binding: Binding) -> Option<Binding> {
        self.handlers.insert((node, namespace), binding)
    }

    pub fn unbind_instance(&mut self, instance: InstanceId) {
        self.handlers.retain(|_, b| b.instance != instance);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn on_node(&self, node: Id) -> Option<Binding> {
        [Namespace::NavRight, Namespace::NavLeft, Namespace::Goto]
            .into_iter()
            .find_map(|ns| self.handlers.get(&(node, ns)).copied())
    }

    /// Find the handler for a click on `target`, bubbling through ancestors.
    pub fn resolve(&self, doc: &Document, target: Id) -> Option<Binding> {
        doc.ancestors_inclusive(target)
            .find_map(|node| self.on_node(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::build::{doc, elem, text};

    fn binding(action: Action) -> Binding {
        Binding {
            instance: InstanceId(1),
            action,
        }
    }

    #[test]
    fn rebinding_replaces_instead_of_stacking() {
        let mut events = EventBindings::new();
        let first = binding(Action::Display(0));
        let second = binding(Action::Display(1));
        assert_eq!(events.bind(Id(5), Namespace::Goto, first), None);
        assert_eq!(events.bind(Id(5), Namespace::Goto, second), Some(first));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn clicks_bubble_to_nearest_bound_ancestor() {
        // #document(1) > span(2) > b(3) > "x"(4)
        let dom = Document::from_node(&doc(vec![elem(
            "span",
            &[],
            vec![elem("b", &[], vec![text("x")])],
        )]));
        let mut events = EventBindings::new();
        let nav = binding(Action::Navigate(Direction::Forward));
        events.bind(Id(2), Namespace::NavRight, nav);
        assert_eq!(events.resolve(&dom, Id(4)), Some(nav));
        assert_eq!(events.resolve(&dom, Id(1)), None);
        assert_eq!(events.resolve(&dom, Id(42)), None);
    }

    #[test]
    fn unbind_instance_keeps_other_instances() {
        let mut events = EventBindings::new();
        events.bind(Id(2), Namespace::Goto, binding(Action::Display(0)));
        events.bind(
            Id(3),
            Namespace::Goto,
            Binding {
                instance: InstanceId(2),
                action: Action::Display(0),
            },
        );
        events.unbind_instance(InstanceId(1));
        assert_eq!(events.len(), 1);
    }
}
