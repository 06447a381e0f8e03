//! Per-element handler lists, one ordered list per event category.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::input::{Event, EventKind};
use crate::dom::node::NodeId;
use crate::dom::Document;

/// An event handler. Receives the document so it can mutate the tree, the
/// node it is registered on, and the event.
pub type Handler = Rc<dyn Fn(&mut Document, NodeId, &Event)>;

/// Identifies a registered handler for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Handler lists of a single element.
#[derive(Clone, Default)]
pub struct Listeners {
    lists: BTreeMap<EventKind, Vec<(ListenerId, Handler)>>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `kind`.
    pub fn add(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.lists.entry(kind).or_default().push((id, handler));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered for `kind`.
    pub fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.lists.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(entry, _)| *entry != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.lists.remove(&kind);
        }
        removed
    }

    /// Handlers for `kind` in registration order. Cloned so dispatch can
    /// hand out `&mut Document` while iterating.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.lists
            .get(&kind)
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.lists.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<_, _> = self.lists.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("Listeners").field("counts", &counts).finish()
    }
}
