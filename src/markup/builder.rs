//! Phase two of markup ingestion: building elements from scanned operations.
//!
//! [`MarkupParser`] owns the scanner state and the stack of open elements, so
//! one parser can be fed markup over many calls. Each call returns the element
//! on top of the stack, which is where the next call continues.

use std::sync::Arc;

use tracing::{debug, trace};

use super::registry::Registry;
use super::tokenizer::{MarkupOp, Scanner};
use crate::dom::attribute::Attribute;
use crate::dom::data::DataValue;
use crate::dom::node::{Element, NodeId};
use crate::dom::Document;
use crate::error::DomError;

/// Resumable markup compiler state, held by the caller.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    scanner: Scanner,
    /// Operations carried to the next call (a compound attribute whose value
    /// has not arrived yet).
    pending: Vec<MarkupOp>,
    stack: Vec<NodeId>,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open elements, the ingestion base included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The element new content currently goes into.
    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Forget all state, as if newly created.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Compile `markup` into elements under `base`.
    ///
    /// `base` becomes the bottom of the element stack when the stack is
    /// empty; otherwise ingestion continues in the innermost element left open
    /// by earlier calls. Elements removed from the document since then are
    /// dropped from the stack first. Unknown tags and attributes are skipped
    /// silently. A setter error stops the build and the rest of this call's
    /// operations are discarded.
    pub fn ingest(
        &mut self,
        doc: &mut Document,
        base: NodeId,
        markup: &str,
    ) -> Result<NodeId, DomError> {
        doc.element(base)?;
        self.stack.retain(|&id| doc.contains(id));
        if self.stack.is_empty() {
            self.stack.push(base);
        }

        let registry = Arc::clone(&doc.config().registry);
        let mut ops = std::mem::take(&mut self.pending);
        let carried = ops.len();
        self.scanner.scan(markup, &registry, &mut ops);
        let scanned = ops.len() - carried;

        let result = self.build(doc, &registry, ops);
        debug!(
            bytes = markup.len(),
            ops = scanned,
            depth = self.stack.len(),
            "ingested markup"
        );
        result?;
        self.current().ok_or(DomError::NodeNotFound)
    }

    fn build(
        &mut self,
        doc: &mut Document,
        registry: &Registry,
        ops: Vec<MarkupOp>,
    ) -> Result<(), DomError> {
        let mut ops = ops.into_iter().peekable();
        while let Some(op) = ops.next() {
            let top = self.current().ok_or(DomError::NodeNotFound)?;
            match op {
                MarkupOp::Open(tag) => {
                    let Some(factory) = registry.factory(&tag) else {
                        continue;
                    };
                    let id = doc.create_element(factory())?;
                    doc.append_child(top, id)?;
                    self.stack.push(id);
                }
                MarkupOp::Close => {
                    if self.stack.len() > 1 {
                        self.stack.pop();
                    }
                }
                MarkupOp::Attribute(name) => {
                    let value = match ops.next_if(|next| matches!(next, MarkupOp::AttributeValue(_))) {
                        Some(MarkupOp::AttributeValue(value)) => value,
                        _ => {
                            if ops.peek().is_none() && self.scanner.awaiting_value() {
                                self.pending.push(MarkupOp::Attribute(name));
                            } else {
                                trace!(%name, "attribute without value dropped");
                            }
                            continue;
                        }
                    };
                    if let Some(entry) = registry.attribute(&name, true) {
                        (entry.setter)(doc, top, &value)?;
                    }
                }
                MarkupOp::AttributeSimple(name) => {
                    if let Some(entry) = registry.attribute(&name, false) {
                        (entry.setter)(doc, top, "")?;
                    }
                }
                MarkupOp::AttributeValue(value) => {
                    trace!(%value, "value without attribute dropped");
                }
                MarkupOp::Color(color) => {
                    let span = Element::new(doc.config().color_span_tag.clone())
                        .with_attribute(Attribute::TextColor(color));
                    let id = doc.create_element(span)?;
                    doc.append_child(top, id)?;
                    self.stack.push(id);
                }
                MarkupOp::Text(text) => {
                    doc.set_attribute(top, DataValue::Text(text))?;
                }
            }
        }
        Ok(())
    }
}

impl Document {
    /// Compile `markup` into new children of `node` with a fresh parser.
    /// Returns the innermost element left open.
    pub fn append_markup(&mut self, node: NodeId, markup: &str) -> Result<NodeId, DomError> {
        MarkupParser::new().ingest(self, node, markup)
    }

    /// Compile `markup` as siblings of `node`: into its parent, or into `node`
    /// itself when it has no parent.
    pub fn append_sibling_markup(&mut self, node: NodeId, markup: &str) -> Result<NodeId, DomError> {
        let target = self.element(node)?.parent().unwrap_or(node);
        self.append_markup(target, markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::attribute::AttributeKind;
    use crate::style::color::Color;
    use crate::style::dimension::Dimension;
    use pretty_assertions::assert_eq;

    fn kids(doc: &Document, id: NodeId) -> Vec<NodeId> {
        doc.children(id).unwrap().collect()
    }

    fn tag(doc: &Document, id: NodeId) -> &str {
        &doc.get(id).unwrap().tag
    }

    // ── Building ─────────────────────────────────────────────────────

    #[test]
    fn nested_markup_builds_tree() {
        let mut doc = Document::new();
        let root = doc.root();
        let top = doc
            .append_markup(root, r#"<div id="a"><p>Hello</p></div>"#)
            .unwrap();
        assert_eq!(top, root);

        let divs = kids(&doc, root);
        assert_eq!(divs.len(), 1);
        assert_eq!(tag(&doc, divs[0]), "div");
        assert_eq!(doc.get(divs[0]).unwrap().index_key(), Some("a"));

        let ps = kids(&doc, divs[0]);
        assert_eq!(ps.len(), 1);
        assert_eq!(tag(&doc, ps[0]), "p");
        assert_eq!(doc.get(ps[0]).unwrap().data.strings, vec!["Hello"]);

        assert_eq!(doc.query("a").unwrap(), vec![divs[0]]);
        let all = doc.query("*").unwrap();
        assert!(all.contains(&divs[0]));
        assert!(all.contains(&ps[0]));
    }

    #[test]
    fn returns_innermost_open_element() {
        let mut doc = Document::new();
        let root = doc.root();
        let top = doc.append_markup(root, "<ul><li>one").unwrap();
        assert_eq!(tag(&doc, top), "li");
        assert_eq!(doc.ancestors(top).len(), 2);
    }

    #[test]
    fn extra_closing_tags_never_pop_base() {
        let mut doc = Document::new();
        let root = doc.root();
        let top = doc.append_markup(root, "</div></div>tail").unwrap();
        assert_eq!(top, root);
        assert_eq!(doc.get(root).unwrap().data.strings, vec!["tail"]);
    }

    #[test]
    fn closing_tag_pops_regardless_of_name() {
        let mut doc = Document::new();
        let root = doc.root();
        let top = doc.append_markup(root, "<div><span></p>after").unwrap();
        let div = kids(&doc, root)[0];
        assert_eq!(top, div);
        assert_eq!(doc.get(div).unwrap().data.strings, vec!["after"]);
    }

    #[test]
    fn unknown_tags_leave_text_on_base() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_markup(root, "<bogustag>text</bogustag>").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get(root).unwrap().data.strings, vec!["text"]);
    }

    #[test]
    fn attributes_apply_to_new_element() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_markup(root, "<div top=10px left=5% block center></div>")
            .unwrap();
        let div = kids(&doc, root)[0];
        let el = doc.get(div).unwrap();
        assert_eq!(
            el.attribute(AttributeKind::ObjectTop),
            Some(&Attribute::ObjectTop(Dimension::px(10.0)))
        );
        assert_eq!(
            el.attribute(AttributeKind::ObjectLeft),
            Some(&Attribute::ObjectLeft(Dimension::percent(5.0)))
        );
        assert!(el.attribute(AttributeKind::Display).is_some());
        assert!(el.attribute(AttributeKind::TextAlignment).is_some());
    }

    #[test]
    fn color_span_stays_open() {
        let mut doc = Document::new();
        let root = doc.root();
        let top = doc.append_markup(root, "<blue>sky").unwrap();
        let el = doc.get(top).unwrap();
        assert_eq!(el.tag, "textnode");
        assert_eq!(
            el.attribute(AttributeKind::TextColor),
            Some(&Attribute::TextColor(Color::from_rgb(0x0000FF)))
        );
        assert_eq!(el.data.strings, vec!["sky"]);
    }

    #[test]
    fn self_closing_does_not_nest() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_markup(root, "a<br/>b").unwrap();
        let children = kids(&doc, root);
        assert_eq!(children.len(), 1);
        assert_eq!(tag(&doc, children[0]), "br");
        assert_eq!(doc.get(root).unwrap().data.strings, vec!["a", "b"]);
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn setter_error_propagates() {
        let mut doc = Document::new();
        let root = doc.root();
        let err = doc
            .append_markup(root, "<div margin='1px 2px'><p>x</p></div>")
            .unwrap_err();
        assert_eq!(err, DomError::InvalidQuad("1px 2px".into()));
        // The div was created before the failing attribute; nothing after it.
        let div = kids(&doc, root)[0];
        assert!(kids(&doc, div).is_empty());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_markup(root, "<div id=x></div>").unwrap();
        let err = doc.append_markup(root, "<div id=x></div>").unwrap_err();
        assert_eq!(err, DomError::DuplicateKey("x".into()));
        assert_eq!(doc.query("x").unwrap().len(), 1);
    }

    // ── Resumption ───────────────────────────────────────────────────

    #[test]
    fn parser_continues_across_calls() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut parser = MarkupParser::new();
        let ul = parser.ingest(&mut doc, root, "<ul>").unwrap();
        assert_eq!(tag(&doc, ul), "ul");
        parser.ingest(&mut doc, root, "<li>one</li>").unwrap();
        parser.ingest(&mut doc, root, "<li>two</li>").unwrap();
        let back = parser.ingest(&mut doc, root, "</ul>").unwrap();
        assert_eq!(back, root);
        assert_eq!(kids(&doc, ul).len(), 2);
        assert_eq!(parser.depth(), 1);
    }

    #[test]
    fn pending_attribute_binds_next_value() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut parser = MarkupParser::new();
        parser.ingest(&mut doc, root, "<div id=").unwrap();
        parser.ingest(&mut doc, root, "later>").unwrap();
        assert!(doc.has_element("later"));
    }

    #[test]
    fn deeply_nested_markup() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut parser = MarkupParser::new();
        let top = parser.ingest(&mut doc, root, &"<div>".repeat(40_000)).unwrap();
        assert_eq!(parser.depth(), 40_001);
        assert_eq!(doc.len(), 40_001);
        assert_eq!(doc.walk_depth_first(root).last(), Some(&top));
        let back = parser.ingest(&mut doc, root, &"</div>".repeat(40_000)).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn removed_stack_entries_are_pruned() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut parser = MarkupParser::new();
        let div = parser.ingest(&mut doc, root, "<div>").unwrap();
        doc.remove(div).unwrap();
        let top = parser.ingest(&mut doc, root, "text").unwrap();
        assert_eq!(top, root);
        assert_eq!(doc.get(root).unwrap().data.strings, vec!["text"]);
    }

    #[test]
    fn sibling_markup_goes_to_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_markup(root, "<p>first</p>").unwrap();
        let first = kids(&doc, root)[0];
        doc.append_sibling_markup(first, "<p>second</p>").unwrap();
        assert_eq!(kids(&doc, root).len(), 2);
        doc.append_sibling_markup(root, "<p>third</p>").unwrap();
        assert_eq!(kids(&doc, root).len(), 3);
    }
}
