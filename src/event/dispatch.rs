//! Listener registration and synchronous dispatch on a [`Document`].

use std::rc::Rc;

use tracing::trace;

use super::input::{Event, EventKind};
use super::listener::ListenerId;
use super::queue::EventQueue;
use crate::dom::node::NodeId;
use crate::dom::Document;
use crate::error::DomError;

impl Document {
    /// Register `handler` for `kind` events on `node`. Handlers run in
    /// registration order.
    pub fn add_listener<F>(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: F,
    ) -> Result<ListenerId, DomError>
    where
        F: Fn(&mut Document, NodeId, &Event) + 'static,
    {
        Ok(self.element_mut(node)?.listeners.add(kind, Rc::new(handler)))
    }

    /// Unregister a handler. Returns `false` if it was not registered.
    pub fn remove_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        id: ListenerId,
    ) -> Result<bool, DomError> {
        Ok(self.element_mut(node)?.listeners.remove(kind, id))
    }

    /// Invoke every handler registered on `node` for the event's category.
    ///
    /// Handlers may mutate the document. The handler list is fixed when
    /// dispatch starts; if a handler removes `node`, the remaining handlers
    /// are skipped. Returns the number of handlers invoked.
    pub fn dispatch_event(&mut self, node: NodeId, event: &Event) -> Result<usize, DomError> {
        let kind = event.kind();
        let handlers = self.element(node)?.listeners.snapshot(kind);
        trace!(?kind, handlers = handlers.len(), "dispatch");
        let mut invoked = 0;
        for handler in handlers {
            if !self.contains(node) {
                break;
            }
            handler(&mut *self, node, event);
            invoked += 1;
        }
        Ok(invoked)
    }

    /// Drain `queue` and dispatch each event in arrival order. Events whose
    /// target no longer exists are dropped. Returns the number of events
    /// delivered.
    pub fn process_events(&mut self, queue: &mut EventQueue) -> usize {
        let mut delivered = 0;
        for envelope in queue.drain() {
            match self.dispatch_event(envelope.target, &envelope.event) {
                Ok(_) => delivered += 1,
                Err(_) => trace!("dropped event for a removed element"),
            }
        }
        delivered
    }
}
