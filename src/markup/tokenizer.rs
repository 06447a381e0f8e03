//! Phase one of markup ingestion: a resumable character scanner.
//!
//! The scanner turns markup text into a flat list of [`MarkupOp`]s. All of
//! its state lives in [`Scanner`], so input may arrive in arbitrary chunks: a
//! tag split across two calls is recognised once the second half arrives.
//!
//! Inside `<...>` the first word is the tag name, looked up in the factory
//! table and then the named-color table. Later words are attribute names,
//! looked up in the attribute table; a compound attribute takes the next word
//! (or quoted string) as its value. Words that match nothing are dropped.

use tracing::trace;

use super::registry::Registry;
use crate::style::color::Color;

/// One scanned markup operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupOp {
    /// Open an element of this (lower-case) tag.
    Open(String),
    /// Close the innermost open element.
    Close,
    /// A compound attribute; its value is the following `AttributeValue`.
    Attribute(String),
    /// A simple attribute with a fixed effect.
    AttributeSimple(String),
    /// Raw value text for the preceding `Attribute`.
    AttributeValue(String),
    /// Open an inline span with this text color.
    Color(Color),
    /// Free text between tags.
    Text(String),
}

/// What ended the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Space,
    Equals,
    Slash,
    TagEnd,
}

/// Scanner state carried between calls.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    capture: String,
    text: String,
    in_tag: bool,
    /// The tag name of the current tag has been consumed.
    name_seen: bool,
    closing: bool,
    self_closing: bool,
    /// The current tag opened an element (or color span).
    opened: bool,
    /// A compound attribute is waiting for its value.
    expect_value: bool,
    /// The awaited value belongs to an unknown attribute and is dropped.
    drop_value: bool,
    quote: Option<char>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the last call ended inside a tag right after a compound
    /// attribute name, so the next call's first word is its value.
    pub fn awaiting_value(&self) -> bool {
        self.in_tag && self.expect_value && !self.drop_value
    }

    /// `true` when the last call ended between tags with nothing buffered.
    pub fn is_idle(&self) -> bool {
        !self.in_tag && self.capture.is_empty() && self.text.is_empty()
    }

    /// Scan `input`, appending operations to `ops`. Pending free text is
    /// flushed at the end of the call.
    pub fn scan(&mut self, input: &str, registry: &Registry, ops: &mut Vec<MarkupOp>) {
        for c in input.chars() {
            if !self.in_tag {
                if c == '<' {
                    self.flush_text(ops);
                    self.begin_tag();
                } else {
                    self.text.push(c);
                }
                continue;
            }

            if let Some(q) = self.quote {
                if c == q {
                    self.quote = None;
                    self.finish_value(ops);
                } else {
                    self.capture.push(c);
                }
                continue;
            }

            match c {
                '"' | '\'' if self.capture.is_empty() && self.expect_value => {
                    self.quote = Some(c);
                }
                '=' => self.resolve(Delim::Equals, registry, ops),
                '>' => {
                    self.resolve(Delim::TagEnd, registry, ops);
                    self.end_tag(ops);
                }
                '/' => {
                    if self.capture.is_empty() && !self.name_seen {
                        self.closing = true;
                    } else {
                        self.resolve(Delim::Slash, registry, ops);
                        self.self_closing = true;
                    }
                }
                c if c.is_whitespace() => self.resolve(Delim::Space, registry, ops),
                c => {
                    // Only a `/` directly before `>` (or trailing spaces) closes.
                    self.self_closing = false;
                    self.capture.push(c);
                }
            }
        }
        self.flush_text(ops);
    }

    fn flush_text(&mut self, ops: &mut Vec<MarkupOp>) {
        if !self.text.is_empty() {
            ops.push(MarkupOp::Text(std::mem::take(&mut self.text)));
        }
    }

    fn begin_tag(&mut self) {
        self.in_tag = true;
        self.capture.clear();
        self.name_seen = false;
        self.closing = false;
        self.self_closing = false;
        self.opened = false;
        self.expect_value = false;
        self.drop_value = false;
    }

    fn end_tag(&mut self, ops: &mut Vec<MarkupOp>) {
        if self.self_closing && self.opened && !self.closing {
            ops.push(MarkupOp::Close);
        }
        self.in_tag = false;
        self.expect_value = false;
        self.drop_value = false;
        self.capture.clear();
    }

    fn finish_value(&mut self, ops: &mut Vec<MarkupOp>) {
        let value = std::mem::take(&mut self.capture);
        if self.drop_value {
            trace!(%value, "dropped value of unknown attribute");
        } else {
            ops.push(MarkupOp::AttributeValue(value));
        }
        self.expect_value = false;
        self.drop_value = false;
    }

    /// Classify the captured word.
    fn resolve(&mut self, delim: Delim, registry: &Registry, ops: &mut Vec<MarkupOp>) {
        if self.capture.is_empty() {
            return;
        }
        if self.expect_value {
            self.finish_value(ops);
            return;
        }

        let key = std::mem::take(&mut self.capture).to_lowercase();

        if !self.name_seen {
            self.name_seen = true;
            self.resolve_name(key, registry, ops);
            return;
        }
        if self.closing || !self.opened {
            trace!(%key, "ignored word after tag name");
            return;
        }

        match registry.attribute(&key, delim == Delim::Equals) {
            Some(entry) if entry.compound => {
                ops.push(MarkupOp::Attribute(key));
                self.expect_value = true;
            }
            Some(_) => ops.push(MarkupOp::AttributeSimple(key)),
            None => {
                trace!(%key, "discarded unknown attribute");
                if delim == Delim::Equals {
                    self.expect_value = true;
                    self.drop_value = true;
                }
            }
        }
    }

    fn resolve_name(&mut self, key: String, registry: &Registry, ops: &mut Vec<MarkupOp>) {
        let color = Color::named(&key);
        if self.closing {
            if registry.has_factory(&key) || color.is_some() {
                ops.push(MarkupOp::Close);
            } else {
                trace!(%key, "discarded unknown closing tag");
            }
        } else if registry.has_factory(&key) {
            ops.push(MarkupOp::Open(key));
            self.opened = true;
        } else if let Some(c) = color {
            ops.push(MarkupOp::Color(c));
            self.opened = true;
        } else {
            trace!(%key, "discarded unknown tag");
        }
    }
}
