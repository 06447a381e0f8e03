//! Secondary index from string key to element.
//!
//! The index is kept bijective with the elements' `IndexBy` attributes: an
//! element with a non-empty key has exactly one entry, and every entry points
//! at the element holding that key.

use std::collections::HashMap;

use super::node::NodeId;
use crate::error::DomError;

/// Key → element map, non-owning.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    map: HashMap<String, NodeId>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.map.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.map.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Reconcile the index with a key change on `node`.
    ///
    /// `old` is the key currently stored on the element (empty if none).
    /// Must run before the new key is stored, since it compares against the
    /// previous value. A key owned by a different element is rejected and the
    /// index is left untouched.
    pub fn update(&mut self, node: NodeId, old: &str, new: &str) -> Result<(), DomError> {
        match (old.is_empty(), new.is_empty()) {
            (true, true) => Ok(()),
            (false, false) if old == new => Ok(()),
            (false, false) => {
                self.ensure_free(node, new)?;
                self.erase(old, node);
                self.map.insert(new.to_owned(), node);
                Ok(())
            }
            (false, true) => {
                self.erase(old, node);
                Ok(())
            }
            (true, false) => {
                self.ensure_free(node, new)?;
                self.map.insert(new.to_owned(), node);
                Ok(())
            }
        }
    }

    /// Remove the entry for `key` if it points at `node`. A missing or foreign
    /// entry is left alone; removal bookkeeping never fails.
    pub fn erase(&mut self, key: &str, node: NodeId) -> bool {
        if self.map.get(key) == Some(&node) {
            self.map.remove(key);
            true
        } else {
            false
        }
    }

    fn ensure_free(&self, node: NodeId, key: &str) -> Result<(), DomError> {
        match self.map.get(key) {
            Some(&owner) if owner != node => Err(DomError::DuplicateKey(key.to_owned())),
            _ => Ok(()),
        }
    }
}
