//! Node types: NodeId, Element.

use slotmap::new_key_type;

use super::attribute::{Attribute, AttributeKind, AttributeMap};
use super::data::DataChannels;
use crate::event::listener::Listeners;

new_key_type! {
    /// Unique identifier for an element. Copy, lightweight (u64). Stale
    /// handles are detected, never dereferenced.
    pub struct NodeId;
}

/// One document entity: a container, a text run or a widget.
///
/// Tree links are handles into the owning `Document`'s arena. They are set
/// only by the document's tree operations.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name the element was created under (e.g. `"div"`).
    pub tag: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) child_count: usize,
    pub(crate) attributes: AttributeMap,
    /// Appendable payload channels.
    pub data: DataChannels,
    pub(crate) listeners: Listeners,
    /// Names of styles applied with `Document::apply_style`, in order.
    pub styles: Vec<String>,
}

impl Element {
    /// A detached element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: store an attribute before the element is attached.
    ///
    /// An index key set this way is registered when the element is created
    /// in a document.
    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.attributes.insert(attr);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(kind)
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// The element's index key, if set and non-empty.
    pub fn index_key(&self) -> Option<&str> {
        match self.attributes.get(AttributeKind::IndexBy) {
            Some(Attribute::IndexBy(key)) if !key.is_empty() => Some(key),
            _ => None,
        }
    }

    /// Whether the element is linked into a tree under some parent.
    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn unlink(&mut self) {
        self.parent = None;
        self.next_sibling = None;
        self.prev_sibling = None;
    }
}
