//! Plain-text tree dump, for debugging and snapshot tests.

use std::fmt::Write;

use super::node::NodeId;
use super::tree::Document;
use crate::error::DomError;

const INDENT: usize = 4;
const NO_KEY: &str = "-noID-";

impl Document {
    /// Render the subtree under `node`, one element per line:
    ///
    /// ```text
    /// 0 document (-noID-)
    ///     1 div (menu)
    ///         2 p (-noID-)
    ///           "Hello"
    /// ```
    ///
    /// Each line is the depth relative to `node`, the tag and the index key.
    /// String data entries follow their element, quoted. Lines are separated
    /// by `'\n'` with no trailing newline.
    pub fn dump(&self, node: NodeId) -> Result<String, DomError> {
        self.element(node)?;
        let mut out = String::new();
        self.dump_into(&mut out, node);
        out.truncate(out.trim_end_matches('\n').len());
        Ok(out)
    }

    fn dump_into(&self, out: &mut String, node: NodeId) {
        let mut stack = vec![(node, 0usize)];
        while let Some((current, level)) = stack.pop() {
            let Some(el) = self.get(current) else {
                continue;
            };
            let pad = level * INDENT;
            let key = el.index_key().unwrap_or(NO_KEY);
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{:pad$}{level} {} ({key})", "", el.tag);
            for text in &el.data.strings {
                let _ = writeln!(out, "{:width$}{text:?}", "", width = pad + 2);
            }
            // Last child first, so the first child is written next.
            let mut child = el.last_child();
            while let Some(c) = child {
                stack.push((c, level + 1));
                child = self.get(c).and_then(|e| e.prev_sibling());
            }
        }
    }
}
