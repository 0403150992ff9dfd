pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    /// Reserved sentinel for "unassigned" identity.
    pub const INVALID: Id = Id(0);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Attribute value lookup; names compare ASCII case-insensitively.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => get_attribute(attributes, key),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

pub(crate) fn get_attribute<'a>(
    attributes: &'a [(String, Option<String>)],
    key: &str,
) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_deref())
}

/// Shorthand constructors for hand-built trees (fixtures, demo content).
pub mod build {
    use super::{Id, Node};

    pub fn doc(children: Vec<Node>) -> Node {
        Node::Document {
            id: Id::INVALID,
            doctype: None,
            children,
        }
    }

    pub fn elem(name: &str, attributes: &[(&str, &str)], children: Vec<Node>) -> Node {
        Node::Element {
            id: Id::INVALID,
            name: name.to_ascii_lowercase(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), Some(v.to_string())))
                .collect(),
            style: Vec::new(),
            children,
        }
    }

    pub fn text(text: &str) -> Node {
        Node::Text {
            id: Id::INVALID,
            text: text.to_string(),
        }
    }
}
