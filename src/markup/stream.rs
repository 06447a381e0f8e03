//! Formatted markup output into a document.
//!
//! [`MarkupStream`] implements [`fmt::Write`], so `write!` and `writeln!`
//! can compose markup directly into an element.

use std::fmt;

use super::builder::MarkupParser;
use crate::dom::node::NodeId;
use crate::dom::Document;
use crate::error::DomError;

/// A writer that compiles everything written to it into one element.
///
/// All writes share one [`MarkupParser`], so a tag may be split across
/// `write!` calls. The first ingestion error is kept and every later write
/// fails with [`fmt::Error`]; [`finish`](Self::finish) reports it.
pub struct MarkupStream<'a> {
    doc: &'a mut Document,
    node: NodeId,
    parser: MarkupParser,
    error: Option<DomError>,
}

impl<'a> MarkupStream<'a> {
    pub fn new(doc: &'a mut Document, node: NodeId) -> Self {
        Self {
            doc,
            node,
            parser: MarkupParser::new(),
            error: None,
        }
    }

    /// The element the next write goes into.
    pub fn current(&self) -> NodeId {
        self.parser.current().unwrap_or(self.node)
    }

    /// End the stream, returning the innermost open element or the first
    /// error hit while writing.
    pub fn finish(self) -> Result<NodeId, DomError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.current()),
        }
    }
}

impl fmt::Write for MarkupStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.error.is_some() {
            return Err(fmt::Error);
        }
        match self.parser.ingest(self.doc, self.node, s) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.error = Some(err);
                Err(fmt::Error)
            }
        }
    }
}

impl Document {
    /// Open a [`MarkupStream`] writing into `node`.
    pub fn markup_stream(&mut self, node: NodeId) -> MarkupStream<'_> {
        MarkupStream::new(self, node)
    }
}
