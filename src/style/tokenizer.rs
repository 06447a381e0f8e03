//! logos-based lexer for four-value shorthands (`coordinates`, `margin`, `padding`).
//!
//! Longest match wins, so `10px` is one [`QuadToken::Dimension`] rather than a
//! number followed by a word. Whitespace is skipped; anything that is not a
//! dimension, a comma or a bracket fails to lex.

use logos::Logos;

/// Token produced by the shorthand lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum QuadToken {
    /// A number with an optional unit suffix: `10px`, `-2.5em`, `50%`, `7`.
    #[regex(r"[+-]?[0-9]+(\.[0-9]*)?(%|[a-zA-Z]+)?")]
    Dimension,

    /// `,`
    #[token(",")]
    Comma,

    /// `(`, `{` or `[`
    #[regex(r"[\(\{\[]")]
    Open,

    /// `)`, `}` or `]`
    #[regex(r"[\)\}\]]")]
    Close,
}
