//! The document: element arena, tree surgery, attribute dispatch.
//!
//! Elements live in a single `SlotMap`. Children form an intrusive doubly
//! linked sibling chain (`first_child` → `next_sibling` → …, mirrored by
//! `last_child` → `prev_sibling` → …) so insertion anywhere is O(1). Removing
//! an element removes its whole subtree from the arena and the key index in
//! the same call.

use slotmap::SlotMap;
use tracing::debug;

use super::attribute::{Attribute, AttributeKind};
use super::data::Setting;
use super::index::KeyIndex;
use super::node::{Element, NodeId};
use crate::config::DocumentConfig;
use crate::error::DomError;
use crate::style::table::{StyleDef, StyleTable};

/// A document tree plus its key index and style table.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, Element>,
    pub(crate) index: KeyIndex,
    styles: StyleTable,
    root: NodeId,
    config: DocumentConfig,
}

impl Document {
    /// Create a document holding only a root element, with default config.
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut index = KeyIndex::new();
        let mut root_el = Element::new(config.root_tag.clone());
        if let Some(key) = config.root_key.as_deref().filter(|k| !k.is_empty()) {
            root_el = root_el.with_attribute(Attribute::IndexBy(key.to_owned()));
        }
        let root = nodes.insert(root_el);
        if let Some(key) = nodes[root].index_key() {
            // Fresh index: the key cannot collide.
            let _ = index.update(root, "", key);
        }
        Self {
            nodes,
            index,
            styles: StyleTable::new(),
            root,
            config,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Number of elements in the arena, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a document keeps its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    /// Like [`get`](Self::get), but a stale handle is an error.
    pub fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        self.nodes.get(id).ok_or(DomError::NodeNotFound)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.nodes.get_mut(id).ok_or(DomError::NodeNotFound)
    }

    pub fn key_index(&self) -> &KeyIndex {
        &self.index
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Move `element` into the arena, detached. Any tree links it carries are
    /// cleared; an index key it carries is registered.
    pub fn create_element(&mut self, mut element: Element) -> Result<NodeId, DomError> {
        element.unlink();
        element.first_child = None;
        element.last_child = None;
        element.child_count = 0;
        let key = element.attributes.remove(AttributeKind::IndexBy);
        let id = self.nodes.insert(element);
        if let Some(attr) = key {
            if let Err(err) = self.set_attribute(id, attr) {
                self.nodes.remove(id);
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Create `element` and append it as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        self.element(parent)?;
        let id = self.create_element(element)?;
        self.append_child(parent, id)?;
        Ok(id)
    }

    // ── Linking ──────────────────────────────────────────────────────

    /// Attach `child` as the last child of `parent`. A child attached
    /// elsewhere is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.prepare_attach(parent, child)?;
        let last = self.nodes[parent].last_child;
        self.link_between(parent, child, last, None);
        Ok(())
    }

    /// Append each of `children` to `parent` in order. Stops at the first
    /// failure; children appended before it stay attached.
    pub fn append_children<I>(&mut self, parent: NodeId, children: I) -> Result<(), DomError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        for child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Attach `sibling` after the last child of `node`'s parent.
    pub fn append_sibling(&mut self, node: NodeId, sibling: NodeId) -> Result<(), DomError> {
        let parent = self.element(node)?.parent.ok_or(DomError::NotAChild)?;
        self.append_child(parent, sibling)
    }

    /// Splice `new` into `parent`'s children immediately before `existing`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new: NodeId,
        existing: NodeId,
    ) -> Result<(), DomError> {
        self.require_child(parent, existing)?;
        if new == existing {
            return Ok(());
        }
        self.prepare_attach(parent, new)?;
        let prev = self.nodes[existing].prev_sibling;
        self.link_between(parent, new, prev, Some(existing));
        Ok(())
    }

    /// Splice `new` into `parent`'s children immediately after `existing`.
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        new: NodeId,
        existing: NodeId,
    ) -> Result<(), DomError> {
        self.require_child(parent, existing)?;
        if new == existing {
            return Ok(());
        }
        self.prepare_attach(parent, new)?;
        let next = self.nodes[existing].next_sibling;
        self.link_between(parent, new, Some(existing), next);
        Ok(())
    }

    /// Put `new` where `old` was, then remove `old` and its subtree from the
    /// arena and the key index.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<(), DomError> {
        self.require_child(parent, old)?;
        if new == old {
            return Ok(());
        }
        self.prepare_attach(parent, new)?;
        let (prev, next) = {
            let el = &self.nodes[old];
            (el.prev_sibling, el.next_sibling)
        };
        self.detach(old);
        self.link_between(parent, new, prev, next);
        let removed = self.destroy_subtree(old);
        debug!(removed, "replaced child");
        Ok(())
    }

    // ── Removal ──────────────────────────────────────────────────────

    /// Remove `child` and its descendants. `child` must be a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.require_child(parent, child)?;
        self.detach(child);
        let removed = self.destroy_subtree(child);
        debug!(removed, "removed child");
        Ok(())
    }

    /// Remove every child of `node` and their descendants. Returns the number
    /// of elements removed.
    pub fn remove_children(&mut self, node: NodeId) -> Result<usize, DomError> {
        let children: Vec<NodeId> = self.children(node)?.collect();
        let mut removed = 0;
        for child in children {
            removed += self.destroy_subtree(child);
        }
        let el = &mut self.nodes[node];
        el.first_child = None;
        el.last_child = None;
        el.child_count = 0;
        debug!(removed, "removed children");
        Ok(removed)
    }

    /// Remove `node` itself with its subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.element(node)?;
        if node == self.root {
            return Err(DomError::CannotRemoveRoot);
        }
        self.detach(node);
        let removed = self.destroy_subtree(node);
        debug!(removed, "removed element");
        Ok(())
    }

    /// Empty every data channel of `node`, then remove its children.
    pub fn clear(&mut self, node: NodeId) -> Result<(), DomError> {
        self.element_mut(node)?.data.clear();
        self.remove_children(node)?;
        Ok(())
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Store an attribute or append a data value.
    ///
    /// Data values go to the matching data channel. An `IndexBy` attribute
    /// updates the key index before it is stored; a key already held by
    /// another element is rejected with state unchanged. Everything else
    /// overwrites the attribute of the same kind.
    pub fn set_attribute(&mut self, node: NodeId, setting: impl Into<Setting>) -> Result<(), DomError> {
        let setting = setting.into();
        let el = self.element(node)?;
        match setting {
            Setting::Data(value) => {
                self.nodes[node].data.append(value);
            }
            Setting::Attr(Attribute::IndexBy(key)) => {
                let old = el.index_key().unwrap_or_default().to_owned();
                self.index.update(node, &old, &key)?;
                self.nodes[node].attributes.insert(Attribute::IndexBy(key));
            }
            Setting::Attr(attr) => {
                self.nodes[node].attributes.insert(attr);
            }
        }
        Ok(())
    }

    /// Apply several settings in order, stopping at the first error.
    pub fn set_attributes<I>(&mut self, node: NodeId, settings: I) -> Result<(), DomError>
    where
        I: IntoIterator,
        I::Item: Into<Setting>,
    {
        for setting in settings {
            self.set_attribute(node, setting)?;
        }
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, kind: AttributeKind) -> Option<&Attribute> {
        self.nodes.get(node)?.attributes.get(kind)
    }

    /// Overwrite the values of `ObjectTop` and `ObjectLeft`, keeping units.
    /// Both must already be set.
    pub fn move_to(&mut self, node: NodeId, top: f64, left: f64) -> Result<(), DomError> {
        self.set_dimension_pair(
            node,
            (AttributeKind::ObjectTop, top),
            (AttributeKind::ObjectLeft, left),
        )
    }

    /// Overwrite the values of `ObjectWidth` and `ObjectHeight`, keeping
    /// units. Both must already be set.
    pub fn resize(&mut self, node: NodeId, width: f64, height: f64) -> Result<(), DomError> {
        self.set_dimension_pair(
            node,
            (AttributeKind::ObjectWidth, width),
            (AttributeKind::ObjectHeight, height),
        )
    }

    fn set_dimension_pair(
        &mut self,
        node: NodeId,
        first: (AttributeKind, f64),
        second: (AttributeKind, f64),
    ) -> Result<(), DomError> {
        let el = self.element_mut(node)?;
        for kind in [first.0, second.0] {
            if !el.attributes.contains(kind) {
                return Err(DomError::MissingAttribute(kind));
            }
        }
        for (kind, value) in [first, second] {
            if let Some(dim) = el.attributes.get_mut(kind).and_then(Attribute::dimension_mut) {
                dim.value = value;
            }
        }
        Ok(())
    }

    /// Append `text` verbatim to the string channel of `node`.
    pub fn print(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(node)?.data.strings.push(text.into());
        Ok(())
    }

    // ── Keys ─────────────────────────────────────────────────────────

    /// The element holding `key`.
    pub fn element_by_key(&self, key: &str) -> Result<NodeId, DomError> {
        self.index
            .get(key)
            .ok_or_else(|| DomError::UnknownKey(key.to_owned()))
    }

    pub fn has_element(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    // ── Styles ───────────────────────────────────────────────────────

    /// Add or replace a named style.
    pub fn define_style(&mut self, name: impl Into<String>, attributes: Vec<Attribute>) {
        self.styles.define(name, attributes);
    }

    pub fn style(&self, name: &str) -> Option<&StyleDef> {
        self.styles.get(name)
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Set every attribute of the named style on `node` and record the name.
    pub fn apply_style(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.element(node)?;
        let attributes = self
            .styles
            .get(name)
            .ok_or_else(|| DomError::UnknownStyle(name.to_owned()))?
            .attributes
            .clone();
        self.set_attributes(node, attributes)?;
        self.nodes[node].styles.push(name.to_owned());
        Ok(())
    }

    // ── Traversal ────────────────────────────────────────────────────

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Children of `id`, first to last.
    pub fn children(&self, id: NodeId) -> Result<Children<'_>, DomError> {
        let el = self.element(id)?;
        Ok(Children {
            doc: self,
            next: el.first_child,
            forward: true,
        })
    }

    /// Children of `id`, last to first.
    pub fn children_rev(&self, id: NodeId) -> Result<Children<'_>, DomError> {
        let el = self.element(id)?;
        Ok(Children {
            doc: self,
            next: el.last_child,
            forward: false,
        })
    }

    /// Ancestors of `id`, from its parent up to the top of its tree. `id`
    /// itself is not included.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start` (document order).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let Some(el) = self.nodes.get(current) else {
                continue;
            };
            result.push(current);
            // Push children last-first so the first child is visited first.
            let mut child = el.last_child;
            while let Some(c) = child {
                stack.push(c);
                child = self.nodes[c].prev_sibling;
            }
        }
        result
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        if self.element(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild);
        }
        Ok(())
    }

    /// Check that `child` may go under `parent` and detach it from any
    /// current parent.
    fn prepare_attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        self.element(child)?;
        if child == self.root || self.is_self_or_ancestor(child, parent) {
            return Err(DomError::WouldCycle);
        }
        self.detach(child);
        Ok(())
    }

    /// `true` when `node` is `of` or one of its ancestors. A childless node
    /// can only be itself.
    fn is_self_or_ancestor(&self, node: NodeId, of: NodeId) -> bool {
        if self.nodes[node].first_child.is_none() {
            return node == of;
        }
        let mut current = Some(of);
        while let Some(id) = current {
            if id == node {
                return true;
            }
            current = self.nodes.get(id).and_then(|el| el.parent);
        }
        false
    }

    /// Link a detached `child` under `parent` between `prev` and `next`,
    /// which must be adjacent children of `parent` (or `None` at the ends).
    fn link_between(
        &mut self,
        parent: NodeId,
        child: NodeId,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    ) {
        {
            let el = &mut self.nodes[child];
            el.parent = Some(parent);
            el.prev_sibling = prev;
            el.next_sibling = next;
        }
        match prev {
            Some(p) => self.nodes[p].next_sibling = Some(child),
            None => self.nodes[parent].first_child = Some(child),
        }
        match next {
            Some(n) => self.nodes[n].prev_sibling = Some(child),
            None => self.nodes[parent].last_child = Some(child),
        }
        self.nodes[parent].child_count += 1;
    }

    /// Unlink `node` from its parent's sibling chain. No-op when detached.
    fn detach(&mut self, node: NodeId) {
        let Some(el) = self.nodes.get(node) else {
            return;
        };
        let Some(parent) = el.parent else {
            return;
        };
        let (prev, next) = (el.prev_sibling, el.next_sibling);
        match prev {
            Some(p) => self.nodes[p].next_sibling = next,
            None => self.nodes[parent].first_child = next,
        }
        match next {
            Some(n) => self.nodes[n].prev_sibling = prev,
            None => self.nodes[parent].last_child = prev,
        }
        let parent_el = &mut self.nodes[parent];
        parent_el.child_count = parent_el.child_count.saturating_sub(1);
        self.nodes[node].unlink();
    }

    /// Drop `node` and its descendants from the arena and the index,
    /// descendants first. Links into the subtree from outside must already
    /// be gone. Returns the number of elements dropped.
    fn destroy_subtree(&mut self, node: NodeId) -> usize {
        let mut order = self.walk_depth_first(node);
        order.reverse();
        let mut removed = 0;
        for id in order {
            if let Some(el) = self.nodes.remove(id) {
                if let Some(key) = el.index_key() {
                    self.index.erase(key, id);
                }
                removed += 1;
            }
        }
        removed
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a sibling chain. See [`Document::children`].
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
    forward: bool,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let el = self.doc.nodes.get(current)?;
        self.next = if self.forward {
            el.next_sibling
        } else {
            el.prev_sibling
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::data::DataValue;
    use crate::style::dimension::Dimension;
    use pretty_assertions::assert_eq;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_element(root, Element::new("div")).unwrap();
        let b = doc.append_element(root, Element::new("div")).unwrap();
        let c = doc.append_element(a, Element::new("p")).unwrap();
        let d = doc.append_element(a, Element::new("span")).unwrap();
        (doc, root, a, b, c, d)
    }

    fn kids(doc: &Document, id: NodeId) -> Vec<NodeId> {
        doc.children(id).unwrap().collect()
    }

    /// Walk every chain and check it against first/last/count.
    fn assert_consistent(doc: &Document) {
        for (id, el) in doc.nodes.iter() {
            let forward = kids(doc, id);
            let mut backward: Vec<_> = doc.children_rev(id).unwrap().collect();
            backward.reverse();
            assert_eq!(forward, backward);
            assert_eq!(forward.len(), el.child_count());
            assert_eq!(forward.first().copied(), el.first_child());
            assert_eq!(forward.last().copied(), el.last_child());
            for child in forward {
                assert_eq!(doc.parent(child), Some(id));
            }
        }
        for (key, id) in doc.key_index().iter() {
            assert_eq!(doc.get(id).and_then(Element::index_key), Some(key));
        }
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_document_has_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(!doc.is_empty());
        assert_eq!(doc.get(doc.root()).unwrap().tag, "document");
    }

    #[test]
    fn root_key_from_config() {
        let doc = Document::with_config(DocumentConfig::new().with_root_key("main"));
        assert_eq!(doc.element_by_key("main").unwrap(), doc.root());
    }

    #[test]
    fn create_element_registers_key() {
        let mut doc = Document::new();
        let id = doc
            .create_element(Element::new("div").with_attribute(Attribute::IndexBy("k".into())))
            .unwrap();
        assert_eq!(doc.element_by_key("k").unwrap(), id);
        let dup = doc.create_element(Element::new("div").with_attribute(Attribute::IndexBy("k".into())));
        assert_eq!(dup, Err(DomError::DuplicateKey("k".into())));
        assert_eq!(doc.len(), 2);
    }

    // ── Linking ──────────────────────────────────────────────────────

    #[test]
    fn append_links_in_order() {
        let (doc, root, a, b, c, d) = build_tree();
        assert_eq!(kids(&doc, root), vec![a, b]);
        assert_eq!(kids(&doc, a), vec![c, d]);
        assert_eq!(doc.get(c).unwrap().next_sibling(), Some(d));
        assert_eq!(doc.get(d).unwrap().prev_sibling(), Some(c));
        assert_consistent(&doc);
    }

    #[test]
    fn insert_before_head_updates_first_child() {
        let (mut doc, root, a, b, ..) = build_tree();
        let n = doc.create_element(Element::new("h1")).unwrap();
        doc.insert_before(root, n, a).unwrap();
        assert_eq!(kids(&doc, root), vec![n, a, b]);
        assert_eq!(doc.get(root).unwrap().first_child(), Some(n));
        assert_consistent(&doc);
    }

    #[test]
    fn insert_before_middle() {
        let (mut doc, root, a, b, ..) = build_tree();
        let n = doc.create_element(Element::new("h1")).unwrap();
        doc.insert_before(root, n, b).unwrap();
        assert_eq!(kids(&doc, root), vec![a, n, b]);
        assert_consistent(&doc);
    }

    #[test]
    fn insert_after_tail_updates_last_child() {
        let (mut doc, root, a, b, ..) = build_tree();
        let n = doc.create_element(Element::new("h2")).unwrap();
        doc.insert_after(root, n, b).unwrap();
        assert_eq!(kids(&doc, root), vec![a, b, n]);
        assert_eq!(doc.get(root).unwrap().last_child(), Some(n));
        assert_consistent(&doc);
    }

    #[test]
    fn insert_after_middle() {
        let (mut doc, root, a, b, ..) = build_tree();
        let n = doc.create_element(Element::new("h2")).unwrap();
        doc.insert_after(root, n, a).unwrap();
        assert_eq!(kids(&doc, root), vec![a, n, b]);
        assert_consistent(&doc);
    }

    #[test]
    fn insert_requires_existing_child() {
        let (mut doc, root, _a, _b, c, _d) = build_tree();
        let n = doc.create_element(Element::new("p")).unwrap();
        assert_eq!(doc.insert_before(root, n, c), Err(DomError::NotAChild));
        assert_eq!(doc.insert_after(root, n, c), Err(DomError::NotAChild));
        assert!(!doc.get(n).unwrap().is_attached());
    }

    #[test]
    fn append_moves_attached_child() {
        let (mut doc, root, a, b, c, d) = build_tree();
        doc.append_child(b, c).unwrap();
        assert_eq!(kids(&doc, a), vec![d]);
        assert_eq!(kids(&doc, b), vec![c]);
        assert_eq!(doc.ancestors(c), vec![b, root]);
        assert_consistent(&doc);
    }

    #[test]
    fn reorder_within_parent() {
        let (mut doc, _root, a, _b, c, d) = build_tree();
        doc.insert_before(a, d, c).unwrap();
        assert_eq!(kids(&doc, a), vec![d, c]);
        assert_consistent(&doc);
    }

    #[test]
    fn cycles_rejected() {
        let (mut doc, root, a, _b, c, _d) = build_tree();
        assert_eq!(doc.append_child(c, a), Err(DomError::WouldCycle));
        assert_eq!(doc.append_child(a, a), Err(DomError::WouldCycle));
        assert_eq!(doc.append_child(a, root), Err(DomError::WouldCycle));
        assert_consistent(&doc);
    }

    #[test]
    fn append_sibling_goes_to_parent_tail() {
        let (mut doc, _root, a, _b, c, d) = build_tree();
        let n = doc.create_element(Element::new("li")).unwrap();
        doc.append_sibling(c, n).unwrap();
        assert_eq!(kids(&doc, a), vec![c, d, n]);
        let m = doc.create_element(Element::new("li")).unwrap();
        let root = doc.root();
        assert_eq!(doc.append_sibling(root, m), Err(DomError::NotAChild));
    }

    #[test]
    fn append_children_in_order() {
        let (mut doc, _root, a, b, c, d) = build_tree();
        let n = doc.create_element(Element::new("li")).unwrap();
        doc.append_children(b, [d, n, c]).unwrap();
        assert_eq!(kids(&doc, b), vec![d, n, c]);
        assert!(kids(&doc, a).is_empty());
        assert_consistent(&doc);
    }

    #[test]
    fn append_children_stops_at_first_error() {
        let (mut doc, root, a, b, c, _d) = build_tree();
        let n = doc.create_element(Element::new("li")).unwrap();
        assert_eq!(doc.append_children(c, [n, a, b]), Err(DomError::WouldCycle));
        assert_eq!(kids(&doc, c), vec![n]);
        assert_eq!(doc.parent(b), Some(root));
        assert_consistent(&doc);
    }

    #[test]
    fn deep_chain_appends_and_removes() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut top = root;
        for _ in 0..40_000 {
            top = doc.append_element(top, Element::new("div")).unwrap();
        }
        assert_eq!(doc.len(), 40_001);
        // Attaching an ancestor beneath the bottom of the chain is still caught.
        let first = kids(&doc, root)[0];
        assert_eq!(doc.append_child(top, first), Err(DomError::WouldCycle));
        doc.remove(first).unwrap();
        assert_eq!(doc.len(), 1);
    }

    // ── Replace / remove ─────────────────────────────────────────────

    #[test]
    fn replace_child_relinks_and_drops_old_subtree() {
        let (mut doc, root, a, b, c, d) = build_tree();
        doc.set_attribute(a, Attribute::IndexBy("a".into())).unwrap();
        doc.set_attribute(c, Attribute::IndexBy("c".into())).unwrap();
        let n = doc.create_element(Element::new("section")).unwrap();
        doc.replace_child(root, n, a).unwrap();
        assert_eq!(kids(&doc, root), vec![n, b]);
        for gone in [a, c, d] {
            assert!(!doc.contains(gone));
        }
        assert!(!doc.has_element("a"));
        assert!(!doc.has_element("c"));
        assert_consistent(&doc);
    }

    #[test]
    fn replace_child_without_key_is_fine() {
        let (mut doc, root, _a, b, ..) = build_tree();
        let n = doc.create_element(Element::new("section")).unwrap();
        doc.replace_child(root, n, b).unwrap();
        assert_eq!(doc.get(root).unwrap().last_child(), Some(n));
        assert_consistent(&doc);
    }

    #[test]
    fn replace_with_descendant_of_old() {
        let (mut doc, root, a, b, c, d) = build_tree();
        doc.replace_child(root, c, a).unwrap();
        assert_eq!(kids(&doc, root), vec![c, b]);
        assert!(!doc.contains(d));
        assert_consistent(&doc);
    }

    #[test]
    fn remove_child_checks_parent() {
        let (mut doc, root, a, _b, c, _d) = build_tree();
        assert_eq!(doc.remove_child(root, c), Err(DomError::NotAChild));
        doc.remove_child(a, c).unwrap();
        assert!(!doc.contains(c));
        assert_eq!(doc.get(a).unwrap().child_count(), 1);
        assert_consistent(&doc);
    }

    #[test]
    fn remove_child_takes_subtree_and_keys() {
        let (mut doc, root, a, b, c, d) = build_tree();
        doc.set_attribute(d, Attribute::IndexBy("deep".into())).unwrap();
        doc.remove_child(root, a).unwrap();
        assert_eq!(doc.len(), 2);
        assert!(!doc.contains(c) && !doc.contains(d));
        assert_eq!(doc.element_by_key("deep"), Err(DomError::UnknownKey("deep".into())));
        assert_eq!(kids(&doc, root), vec![b]);
        assert_consistent(&doc);
    }

    #[test]
    fn remove_children_resets_parent() {
        let (mut doc, root, ..) = build_tree();
        assert_eq!(doc.remove_children(root).unwrap(), 4);
        let el = doc.get(root).unwrap();
        assert_eq!(el.child_count(), 0);
        assert!(el.first_child().is_none());
        assert!(el.last_child().is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn remove_self() {
        let (mut doc, root, a, b, ..) = build_tree();
        doc.remove(a).unwrap();
        assert_eq!(kids(&doc, root), vec![b]);
        assert_eq!(doc.remove(root), Err(DomError::CannotRemoveRoot));
        assert_eq!(doc.remove(a), Err(DomError::NodeNotFound));
        assert_consistent(&doc);
    }

    #[test]
    fn remove_detached_element() {
        let mut doc = Document::new();
        let n = doc
            .create_element(Element::new("p").with_attribute(Attribute::IndexBy("loose".into())))
            .unwrap();
        doc.remove(n).unwrap();
        assert!(!doc.has_element("loose"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn clear_drops_data_and_children() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.print(a, "hello").unwrap();
        doc.clear(a).unwrap();
        let el = doc.get(a).unwrap();
        assert!(el.data.is_empty());
        assert_eq!(el.child_count(), 0);
    }

    // ── Attributes ───────────────────────────────────────────────────

    #[test]
    fn set_attribute_overwrites() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.set_attribute(a, Attribute::Opacity(0.5)).unwrap();
        doc.set_attribute(a, Attribute::Opacity(0.25)).unwrap();
        assert_eq!(doc.attribute(a, AttributeKind::Opacity), Some(&Attribute::Opacity(0.25)));
    }

    #[test]
    fn data_values_append() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.set_attribute(a, DataValue::from("one")).unwrap();
        doc.set_attributes(a, [DataValue::from("two"), DataValue::Number(3.0)]).unwrap();
        let el = doc.get(a).unwrap();
        assert_eq!(el.data.strings, vec!["one", "two"]);
        assert_eq!(el.data.numbers, vec![3.0]);
        assert!(el.attributes().is_empty());
    }

    #[test]
    fn index_key_lifecycle() {
        let (mut doc, _root, a, b, ..) = build_tree();
        doc.set_attribute(a, Attribute::IndexBy("first".into())).unwrap();
        doc.set_attribute(a, Attribute::IndexBy("first".into())).unwrap();
        assert_eq!(doc.key_index().len(), 1);

        doc.set_attribute(a, Attribute::IndexBy("renamed".into())).unwrap();
        assert!(!doc.has_element("first"));
        assert_eq!(doc.element_by_key("renamed").unwrap(), a);

        assert_eq!(
            doc.set_attribute(b, Attribute::IndexBy("renamed".into())),
            Err(DomError::DuplicateKey("renamed".into()))
        );
        assert!(doc.get(b).unwrap().index_key().is_none());

        doc.set_attribute(a, Attribute::IndexBy(String::new())).unwrap();
        assert!(doc.key_index().is_empty());
        assert_consistent(&doc);
    }

    #[test]
    fn move_and_resize_keep_units() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.set_attributes(
            a,
            [
                Attribute::ObjectTop(Dimension::px(1.0)),
                Attribute::ObjectLeft(Dimension::em(2.0)),
                Attribute::ObjectWidth(Dimension::percent(50.0)),
                Attribute::ObjectHeight(Dimension::pt(10.0)),
            ],
        )
        .unwrap();
        doc.move_to(a, 5.0, 6.0).unwrap();
        doc.resize(a, 75.0, 20.0).unwrap();
        assert_eq!(
            doc.attribute(a, AttributeKind::ObjectTop),
            Some(&Attribute::ObjectTop(Dimension::px(5.0)))
        );
        assert_eq!(
            doc.attribute(a, AttributeKind::ObjectLeft),
            Some(&Attribute::ObjectLeft(Dimension::em(6.0)))
        );
        assert_eq!(
            doc.attribute(a, AttributeKind::ObjectWidth),
            Some(&Attribute::ObjectWidth(Dimension::percent(75.0)))
        );
        assert_eq!(
            doc.attribute(a, AttributeKind::ObjectHeight),
            Some(&Attribute::ObjectHeight(Dimension::pt(20.0)))
        );
    }

    #[test]
    fn move_requires_both_attributes() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.set_attribute(a, Attribute::ObjectTop(Dimension::px(1.0))).unwrap();
        assert_eq!(
            doc.move_to(a, 9.0, 9.0),
            Err(DomError::MissingAttribute(AttributeKind::ObjectLeft))
        );
        assert_eq!(
            doc.attribute(a, AttributeKind::ObjectTop),
            Some(&Attribute::ObjectTop(Dimension::px(1.0)))
        );
        assert_eq!(
            doc.resize(a, 1.0, 1.0),
            Err(DomError::MissingAttribute(AttributeKind::ObjectWidth))
        );
    }

    // ── Styles ───────────────────────────────────────────────────────

    #[test]
    fn apply_style_sets_attributes_and_records_name() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.define_style("big", vec![Attribute::TextSize(Dimension::pt(24.0))]);
        doc.apply_style(a, "big").unwrap();
        assert_eq!(
            doc.attribute(a, AttributeKind::TextSize),
            Some(&Attribute::TextSize(Dimension::pt(24.0)))
        );
        assert_eq!(doc.get(a).unwrap().styles, vec!["big"]);
        assert_eq!(
            doc.apply_style(a, "missing"),
            Err(DomError::UnknownStyle("missing".into()))
        );
    }

    // ── Traversal ────────────────────────────────────────────────────

    #[test]
    fn ancestors() {
        let (doc, root, a, _b, c, _d) = build_tree();
        assert_eq!(doc.ancestors(c), vec![a, root]);
        assert!(doc.ancestors(root).is_empty());
    }

    #[test]
    fn walk_depth_first() {
        let (doc, root, a, b, c, d) = build_tree();
        assert_eq!(doc.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(doc.walk_depth_first(a), vec![a, c, d]);
    }

    #[test]
    fn children_rev() {
        let (doc, root, a, b, ..) = build_tree();
        let rev: Vec<_> = doc.children_rev(root).unwrap().collect();
        assert_eq!(rev, vec![b, a]);
    }

    #[test]
    fn stale_handles_are_errors() {
        let (mut doc, _root, a, ..) = build_tree();
        doc.remove(a).unwrap();
        assert_eq!(doc.element(a).err(), Some(DomError::NodeNotFound));
        assert!(doc.children(a).is_err());
        assert_eq!(doc.set_attribute(a, Attribute::Opacity(1.0)), Err(DomError::NodeNotFound));
    }
}
