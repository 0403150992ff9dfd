//! Mutable arena DOM.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`Id`]. Widgets and
//! other in-place mutators work against this store; a plain [`Node`] tree can
//! be imported with [`Document::from_node`] and produced again with
//! [`Document::materialize`].
//!
//! Invariants:
//! - `Id::INVALID` is never assigned to a live node.
//! - A node has at most one parent; detached nodes stay live until removed.
//! - Operations must not create cycles.
//! - Element names are stored ASCII-lowercase.

use crate::dom_utils::{add_class_token, remove_class_token};
use crate::types::{Id, Node, get_attribute};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    MissingNode(Id),
    WrongNodeKind(Id),
    InvalidParent(Id),
    InvalidSibling { parent: Id, reference: Id },
    CycleDetected { parent: Id, child: Id },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::MissingNode(id) => write!(f, "no live node with id {}", id.0),
            DomError::WrongNodeKind(id) => write!(f, "node {} has the wrong kind", id.0),
            DomError::InvalidParent(id) => write!(f, "node {} cannot take this parent", id.0),
            DomError::InvalidSibling { parent, reference } => write!(
                f,
                "node {} is not a child of node {}",
                reference.0, parent.0
            ),
            DomError::CycleDetected { parent, child } => write!(
                f,
                "appending node {} under node {} would create a cycle",
                child.0, parent.0
            ),
        }
    }
}

impl std::error::Error for DomError {}

pub struct Document {
    nodes: Vec<NodeRecord>,
    live: HashMap<Id, usize>,
    root: Id,
    next_id: u32,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            root: Id::INVALID,
            next_id: 1,
        };
        doc.root = doc.insert_node(NodeKind::Document { doctype: None });
        doc
    }

    /// Import a materialized tree. Incoming ids are ignored; fresh ids are
    /// assigned in document order starting at the root.
    pub fn from_node(node: &Node) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            root: Id::INVALID,
            next_id: 1,
        };
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                doc.root = doc.insert_node(NodeKind::Document {
                    doctype: doctype.clone(),
                });
                for child in children {
                    doc.import(doc.root, child);
                }
            }
            other => {
                doc.root = doc.insert_node(NodeKind::Document { doctype: None });
                doc.import(doc.root, other);
            }
        }
        doc
    }

    fn import(&mut self, parent: Id, node: &Node) {
        let id = match node {
            Node::Document { children, .. } => {
                // Nested documents are flattened into the parent.
                for child in children {
                    self.import(parent, child);
                }
                return;
            }
            Node::Element {
                name,
                attributes,
                style,
                ..
            } => self.insert_node(NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes: attributes.clone(),
                style: style.clone(),
            }),
            Node::Text { text, .. } => self.insert_node(NodeKind::Text { text: text.clone() }),
            Node::Comment { text, .. } => {
                self.insert_node(NodeKind::Comment { text: text.clone() })
            }
        };
        self.link(parent, id);
        for child in node.children() {
            self.import(id, child);
        }
    }

    fn insert_node(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let index = self.nodes.len();
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.live.insert(id, index);
        id
    }

    // Only for freshly imported nodes, which are known to be live and detached.
    fn link(&mut self, parent: Id, child: Id) {
        if let (Some(&p), Some(&c)) = (self.live.get(&parent), self.live.get(&child)) {
            self.nodes[p].children.push(child);
            self.nodes[c].parent = Some(parent);
        }
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn contains(&self, id: Id) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Create a detached element. `class` may hold several space separated names.
    pub fn create_element(&mut self, name: &str, class: Option<&str>) -> Id {
        let mut attributes = Vec::new();
        if let Some(class) = class.filter(|c| !c.trim().is_empty()) {
            attributes.push(("class".to_string(), Some(class.to_string())));
        }
        self.insert_node(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes,
            style: Vec::new(),
        })
    }

    fn record(&self, id: Id) -> Result<&NodeRecord, DomError> {
        self.live
            .get(&id)
            .map(|&index| &self.nodes[index])
            .ok_or(DomError::MissingNode(id))
    }

    fn record_mut(&mut self, id: Id) -> Result<&mut NodeRecord, DomError> {
        let index = *self.live.get(&id).ok_or(DomError::MissingNode(id))?;
        Ok(&mut self.nodes[index])
    }

    fn check_attach(&self, parent: Id, child: Id) -> Result<(), DomError> {
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !self.record(parent)?.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        let child_record = self.record(child)?;
        if matches!(child_record.kind, NodeKind::Document { .. }) {
            return Err(DomError::InvalidParent(child));
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.check_attach(parent, child)?;
        self.detach(child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `child` directly after `reference` under `reference`'s parent.
    pub fn insert_after(&mut self, reference: Id, child: Id) -> Result<(), DomError> {
        let parent = self
            .parent(reference)
            .ok_or(DomError::InvalidParent(reference))?;
        self.check_attach(parent, child)?;
        if reference == child {
            return Ok(());
        }
        self.detach(child)?;
        let siblings = &mut self.record_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|k| *k == reference)
            .ok_or(DomError::InvalidSibling { parent, reference })?;
        siblings.insert(pos + 1, child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink a node from its parent; the node and its subtree stay live.
    pub fn detach(&mut self, id: Id) -> Result<(), DomError> {
        let Some(parent) = self.record_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.record_mut(parent)?.children.retain(|k| *k != id);
        Ok(())
    }

    pub fn remove_subtree(&mut self, id: Id) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::InvalidParent(id));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(index) = self.live.remove(&current) {
                stack.extend(self.nodes[index].children.drain(..));
            }
        }
        Ok(())
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).ok().and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack: Vec<Id> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Walk from `id` up to the root, starting with `id` itself.
    pub fn ancestors_inclusive(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        std::iter::successors(self.contains(id).then_some(id), move |&cur| self.parent(cur))
    }

    pub fn is_descendant(&self, ancestor: Id, maybe_descendant: Id) -> bool {
        self.ancestors_inclusive(maybe_descendant)
            .skip(1)
            .any(|a| a == ancestor)
    }

    pub fn is_element(&self, id: Id) -> bool {
        self.record(id)
            .is_ok_and(|r| matches!(r.kind, NodeKind::Element { .. }))
    }

    pub fn element_name(&self, id: Id) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self, id: Id) -> Option<&[(String, Option<String>)]> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn attr(&self, id: Id, key: &str) -> Option<&str> {
        self.attributes(id).and_then(|attrs| get_attribute(attrs, key))
    }

    pub fn set_attribute(&mut self, id: Id, key: &str, value: &str) -> Result<(), DomError> {
        let NodeKind::Element { attributes, .. } = &mut self.record_mut(id)?.kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((key.to_ascii_lowercase(), Some(value.to_string()))),
        }
        Ok(())
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Returns `true` if the class list changed.
    pub fn add_class(&mut self, id: Id, class: &str) -> Result<bool, DomError> {
        let current = self.attr(id, "class").unwrap_or("");
        match add_class_token(current, class) {
            Some(updated) => self.set_attribute(id, "class", &updated).map(|_| true),
            None if self.is_element(id) => Ok(false),
            None => Err(self.kind_error(id)),
        }
    }

    /// Returns `true` if the class list changed.
    pub fn remove_class(&mut self, id: Id, class: &str) -> Result<bool, DomError> {
        if !self.is_element(id) {
            return Err(self.kind_error(id));
        }
        let current = self.attr(id, "class").unwrap_or("");
        match remove_class_token(current, class) {
            Some(updated) => self.set_attribute(id, "class", &updated).map(|_| true),
            None => Ok(false),
        }
    }

    fn kind_error(&self, id: Id) -> DomError {
        if self.contains(id) {
            DomError::WrongNodeKind(id)
        } else {
            DomError::MissingNode(id)
        }
    }

    pub fn set_style(&mut self, id: Id, property: &str, value: &str) -> Result<(), DomError> {
        let NodeKind::Element { style, .. } = &mut self.record_mut(id)?.kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        let property = property.to_ascii_lowercase();
        match style.iter_mut().find(|(k, _)| *k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property, value.to_string())),
        }
        Ok(())
    }

    pub fn style(&self, id: Id, property: &str) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { style, .. } => style
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn materialize(&self) -> Result<Node, DomError> {
        self.materialize_subtree(self.root)
    }

    pub fn materialize_subtree(&self, id: Id) -> Result<Node, DomError> {
        let record = self.record(id)?;
        let children = record
            .children
            .iter()
            .map(|child| self.materialize_subtree(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Document { doctype } => Node::Document {
                id,
                doctype: doctype.clone(),
                children,
            },
            NodeKind::Element {
                name,
                attributes,
                style,
            } => Node::Element {
                id,
                name: name.clone(),
                attributes: attributes.clone(),
                style: style.clone(),
                children,
            },
            NodeKind::Text { text } => Node::Text {
                id,
                text: text.clone(),
            },
            NodeKind::Comment { text } => Node::Comment {
                id,
                text: text.clone(),
            },
        };
        Ok(node)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document { .. } | NodeKind::Element { .. })
    }
}

enum NodeKind {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}
