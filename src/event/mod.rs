//! Events: categories and payloads, per-element listeners, queued delivery.

pub mod dispatch;
pub mod input;
pub mod listener;
pub mod queue;

pub use input::{Event, EventKind, MouseButton};
pub use listener::{Handler, ListenerId, Listeners};
pub use queue::{Envelope, EventQueue};
