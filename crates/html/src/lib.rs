//! In-memory DOM used by the carousel widget and its hosts.
//!
//! [`Node`] is the materialized, owned tree form; [`Document`] is the mutable
//! arena that widgets edit in place.

pub mod document;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod dom_utils;

mod types;

pub use crate::document::{DomError, Document};
pub use crate::types::{Id, Node, NodeId, build};
