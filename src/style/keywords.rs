//! Enumerated attribute values and the shared keyword lookup.
//!
//! Every family (display, position, text alignment, border style, list style
//! type) is parsed the same way: separators are stripped, the text is
//! lower-cased and looked up in the family's option table. A miss is an
//! [`DomError::UnknownOption`] naming the family and the input.

use std::str::FromStr;

use crate::error::DomError;

/// Strip whitespace, `_` and `-`, then lower-case.
fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A closed set of named options.
pub trait Keyword: Sized + Copy + 'static {
    /// Family name used in error messages.
    const FAMILY: &'static str;
    /// Lower-case option names and their values.
    const OPTIONS: &'static [(&'static str, Self)];

    /// Parse an option string.
    fn parse_keyword(input: &str) -> Result<Self, DomError> {
        let key = normalize(input);
        Self::OPTIONS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, value)| value)
            .ok_or_else(|| DomError::UnknownOption {
                family: Self::FAMILY,
                input: input.to_string(),
            })
    }
}

macro_rules! keyword_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = DomError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Keyword>::parse_keyword(s)
                }
            }
        )*
    };
}

/// Display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {
    Inline,
    Block,
    None,
}

impl Keyword for Display {
    const FAMILY: &'static str = "display";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("inline", Display::Inline),
        ("block", Display::Block),
        ("none", Display::None),
    ];
}

/// Positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Absolute,
    Relative,
}

impl Keyword for Position {
    const FAMILY: &'static str = "position";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("absolute", Position::Absolute),
        ("relative", Position::Relative),
    ];
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
}

impl Keyword for TextAlignment {
    const FAMILY: &'static str = "textAlignment";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("left", TextAlignment::Left),
        ("center", TextAlignment::Center),
        ("right", TextAlignment::Right),
        ("justified", TextAlignment::Justified),
    ];
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    None,
    Dotted,
    Dashed,
    Solid,
    Doubled,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl Keyword for BorderStyle {
    const FAMILY: &'static str = "borderStyle";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("none", BorderStyle::None),
        ("dotted", BorderStyle::Dotted),
        ("dashed", BorderStyle::Dashed),
        ("solid", BorderStyle::Solid),
        ("doubled", BorderStyle::Doubled),
        ("groove", BorderStyle::Groove),
        ("ridge", BorderStyle::Ridge),
        ("inset", BorderStyle::Inset),
        ("outset", BorderStyle::Outset),
    ];
}

/// List item marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyleType {
    None,
    Disc,
    Circle,
    Square,
    Decimal,
    Alpha,
    Greek,
    Latin,
    Roman,
}

impl Keyword for ListStyleType {
    const FAMILY: &'static str = "listStyleType";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("none", ListStyleType::None),
        ("disc", ListStyleType::Disc),
        ("circle", ListStyleType::Circle),
        ("square", ListStyleType::Square),
        ("decimal", ListStyleType::Decimal),
        ("alpha", ListStyleType::Alpha),
        ("greek", ListStyleType::Greek),
        ("latin", ListStyleType::Latin),
        ("roman", ListStyleType::Roman),
    ];
}

/// How a line height value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineHeightKind {
    #[default]
    Normal,
    Numeric,
}

impl Keyword for LineHeightKind {
    const FAMILY: &'static str = "lineHeight";
    const OPTIONS: &'static [(&'static str, Self)] = &[
        ("normal", LineHeightKind::Normal),
        ("numeric", LineHeightKind::Numeric),
    ];
}

keyword_from_str!(
    Display,
    Position,
    TextAlignment,
    BorderStyle,
    ListStyleType,
    LineHeightKind
);

/// Line height: a number plus an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineHeight {
    pub value: f64,
    pub kind: LineHeightKind,
}

impl LineHeight {
    /// The font's own line spacing.
    pub fn normal() -> Self {
        Self {
            value: 0.0,
            kind: LineHeightKind::Normal,
        }
    }

    /// An explicit multiple of the font size.
    pub fn numeric(value: f64) -> Self {
        Self {
            value,
            kind: LineHeightKind::Numeric,
        }
    }
}

impl FromStr for LineHeight {
    type Err = DomError;

    /// `"normal"`, `"1.5"`, `"1.5 numeric"`. A bare number is numeric; a
    /// trailing word must name a [`LineHeightKind`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let split = key
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
            .unwrap_or(key.len());
        let (number, word) = key.split_at(split);

        let value = if number.is_empty() {
            0.0
        } else {
            number.parse::<f64>().map_err(|_| DomError::UnknownOption {
                family: LineHeightKind::FAMILY,
                input: s.to_string(),
            })?
        };
        let kind = match (number.is_empty(), word.is_empty()) {
            (_, false) => {
                LineHeightKind::parse_keyword(word).map_err(|_| DomError::UnknownOption {
                    family: LineHeightKind::FAMILY,
                    input: s.to_string(),
                })?
            }
            (false, true) => LineHeightKind::Numeric,
            (true, true) => {
                return Err(DomError::UnknownOption {
                    family: LineHeightKind::FAMILY,
                    input: s.to_string(),
                })
            }
        };
        Ok(Self { value, kind })
    }
}
