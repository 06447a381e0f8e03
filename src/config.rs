//! Document configuration.

use std::sync::Arc;

use crate::markup::registry::Registry;

/// Configuration for a [`Document`](crate::dom::Document).
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Tag of the root element.
    pub root_tag: String,
    /// Optional index key given to the root.
    pub root_key: Option<String>,
    /// Tag of the elements the markup compiler creates for inline color spans.
    pub color_span_tag: String,
    /// Factory and attribute tables used by markup ingestion.
    pub registry: Arc<Registry>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            root_tag: "document".to_owned(),
            root_key: None,
            color_span_tag: "textnode".to_owned(),
            registry: Registry::standard(),
        }
    }
}

impl DocumentConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root tag (builder).
    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = tag.into();
        self
    }

    /// Give the root an index key (builder).
    pub fn with_root_key(mut self, key: impl Into<String>) -> Self {
        self.root_key = Some(key.into());
        self
    }

    /// Set the inline color span tag (builder).
    pub fn with_color_span_tag(mut self, tag: impl Into<String>) -> Self {
        self.color_span_tag = tag.into();
        self
    }

    /// Use a custom registry (builder).
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }
}
