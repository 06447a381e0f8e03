//! Document model: slotmap-backed element arena with intrusive sibling links,
//! typed attributes, data channels and the key index.

pub mod attribute;
pub mod data;
pub mod dump;
pub mod index;
pub mod node;
pub mod query;
pub mod tree;

pub use attribute::{Attribute, AttributeKind, AttributeMap};
pub use data::{DataChannels, DataValue, Setting};
pub use index::KeyIndex;
pub use node::{Element, NodeId};
pub use tree::{Children, Document};
