//! # viewdom
//!
//! A hierarchical UI document model with an embedded markup compiler.
//!
//! A [`Document`] owns a tree of [`Element`]s in a slotmap arena. Each element
//! carries a tag, typed presentation attributes, append-only data channels
//! and per-category event listeners. Elements can be looked up through a
//! unique index key, queried by regular expression, and populated from a
//! small HTML-like markup language.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: element arena, sibling-linked tree surgery, key index, queries, dumps
//! - **[`markup`]**: resumable markup scanner, element builder, tag and attribute tables
//! - **[`style`]**: dimension, color and keyword parsers plus named styles
//! - **[`event`]**: event payloads, listeners, queued dispatch
//! - **[`config`]**: document construction options
//! - **[`error`]**: the crate error type
//!
//! ## Example
//!
//! ```
//! use viewdom::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append_markup(root, r#"<div id="menu"><p>Hello</p></div>"#)?;
//!
//! let menu = doc.element_by_key("menu")?;
//! assert_eq!(doc.element(menu)?.tag, "div");
//! assert_eq!(doc.query("men.*")?, vec![menu]);
//! # Ok::<(), viewdom::DomError>(())
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod style;

// Document model
pub mod dom;
pub mod event;
pub mod markup;

pub use config::DocumentConfig;
pub use dom::{Attribute, AttributeKind, DataValue, Document, Element, NodeId, Setting};
pub use error::DomError;
pub use event::{Event, EventKind, EventQueue};
pub use markup::{MarkupParser, MarkupStream, Registry};
pub use style::{Color, Dimension};
