//! Crate-wide error type.

use crate::dom::attribute::AttributeKind;

/// Errors from tree operations, attribute coercion and queries.
///
/// Every variant except [`DomError::NodeNotFound`] belongs to the
/// invalid-argument class: the caller passed a malformed string or asked for a
/// structurally impossible tree operation. Soft lookup misses (unknown color
/// names, unknown markup tokens, absent index entries during removal) are never
/// reported through this type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomError {
    #[error("{family} attribute string option not found: {input}")]
    UnknownOption { family: &'static str, input: String },
    #[error("could not parse attribute string option: {0}")]
    InvalidQuad(String),
    #[error("referenced element is not a child")]
    NotAChild,
    #[error("node does not exist in the document")]
    NodeNotFound,
    #[error("no element is indexed by {0:?}")]
    UnknownKey(String),
    #[error("index key {0:?} already belongs to another element")]
    DuplicateKey(String),
    #[error("attribute {0:?} has not been set")]
    MissingAttribute(AttributeKind),
    #[error("the document root cannot be removed")]
    CannotRemoveRoot,
    #[error("an element cannot be attached beneath itself")]
    WouldCycle,
    #[error("no style is named {0:?}")]
    UnknownStyle(String),
    #[error("invalid query pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
