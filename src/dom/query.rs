//! Queries: index-key patterns, tags, arbitrary predicates.
//!
//! Results come back in arena order, which is deterministic but not document
//! order. They are snapshots; mutate the tree only after collecting them.

use regex::RegexBuilder;

use super::node::{Element, NodeId};
use super::tree::Document;
use crate::error::DomError;

impl Document {
    /// Elements whose index key matches `pattern`.
    ///
    /// `"*"` returns every element in the arena. Anything else is compiled as
    /// a case-insensitive regular expression that must match the whole key;
    /// elements without a key never match.
    pub fn query(&self, pattern: &str) -> Result<Vec<NodeId>, DomError> {
        if pattern == "*" {
            return Ok(self.nodes.keys().collect());
        }
        let re = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| DomError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(self.query_all(|el| el.index_key().is_some_and(|key| re.is_match(key))))
    }

    /// Elements created under `tag` (case-insensitive).
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|el| el.tag.eq_ignore_ascii_case(tag))
    }

    /// Elements matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, el)| predicate(el))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::attribute::Attribute;
    use crate::dom::node::{Element, NodeId};
    use crate::dom::tree::Document;
    use crate::error::DomError;

    /// ```text
    ///   root
    ///   ├── div  #sidebar
    ///   │   ├── p   #save-button
    ///   │   └── p   #cancel-button
    ///   └── div  (no key)
    /// ```
    fn build_query_tree() -> (Document, [NodeId; 4]) {
        let mut doc = Document::new();
        let root = doc.root();
        let keyed = |tag: &str, key: &str| {
            Element::new(tag).with_attribute(Attribute::IndexBy(key.to_owned()))
        };
        let a = doc.append_element(root, keyed("div", "sidebar")).unwrap();
        let b = doc.append_element(a, keyed("p", "save-button")).unwrap();
        let c = doc.append_element(a, keyed("p", "Cancel-Button")).unwrap();
        let d = doc.append_element(root, Element::new("div")).unwrap();
        (doc, [a, b, c, d])
    }

    fn sorted(mut ids: Vec<NodeId>) -> Vec<NodeId> {
        ids.sort();
        ids
    }

    #[test]
    fn star_returns_everything() {
        let (doc, [a, b, c, d]) = build_query_tree();
        let all = doc.query("*").unwrap();
        assert_eq!(all.len(), 5);
        for id in [doc.root(), a, b, c, d] {
            assert!(all.contains(&id));
        }
    }

    #[test]
    fn exact_key() {
        let (doc, [a, ..]) = build_query_tree();
        assert_eq!(doc.query("sidebar").unwrap(), vec![a]);
    }

    #[test]
    fn pattern_is_case_insensitive() {
        let (doc, [_, b, c, _]) = build_query_tree();
        assert_eq!(
            sorted(doc.query(".*-BUTTON").unwrap()),
            sorted(vec![b, c])
        );
    }

    #[test]
    fn pattern_matches_whole_key() {
        let (doc, _) = build_query_tree();
        assert!(doc.query("side").unwrap().is_empty());
    }

    #[test]
    fn unkeyed_elements_skipped() {
        let (doc, [.., d]) = build_query_tree();
        assert!(!doc.query(".*").unwrap().contains(&d));
    }

    #[test]
    fn invalid_pattern() {
        let (doc, _) = build_query_tree();
        let err = doc.query("(").unwrap_err();
        assert!(matches!(err, DomError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn by_tag() {
        let (doc, [a, _, _, d]) = build_query_tree();
        assert_eq!(sorted(doc.query_by_tag("DIV")), sorted(vec![a, d]));
    }

    #[test]
    fn predicate() {
        let (doc, [_, b, c, _]) = build_query_tree();
        let found = doc.query_all(|el| el.tag == "p");
        assert_eq!(sorted(found), sorted(vec![b, c]));
    }

    #[test]
    fn removed_keys_no_longer_match() {
        let (mut doc, [a, ..]) = build_query_tree();
        doc.remove(a).unwrap();
        assert!(doc.query("sidebar").unwrap().is_empty());
        assert!(doc.query(".*button").unwrap().is_empty());
        assert_eq!(doc.query("*").unwrap().len(), 2);
    }
}
