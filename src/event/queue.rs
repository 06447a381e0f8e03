//! Deferred event delivery.
//!
//! [`EventQueue`] holds [`Envelope`]s until the owner of the document drains
//! them with `Document::process_events`.

use std::collections::VecDeque;

use super::input::Event;
use crate::dom::node::NodeId;

/// An event addressed to one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub target: NodeId,
    pub event: Event,
}

impl Envelope {
    pub fn new(target: NodeId, event: Event) -> Self {
        Self { target, event }
    }
}

/// FIFO queue of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<Envelope>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Shorthand for `push(Envelope::new(target, event))`.
    pub fn post(&mut self, target: NodeId, event: Event) {
        self.push(Envelope::new(target, event));
    }

    /// Drain all pending envelopes in arrival order. The queue is empty
    /// afterwards.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
