//! Dimension values: a number with a unit (px, pt, em, %, auto).

use std::fmt;

use logos::Logos;

use crate::error::DomError;
use crate::style::tokenizer::QuadToken;

/// A layout unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Device pixels.
    Px,
    /// Typographic points.
    Pt,
    /// Multiples of the current font size.
    Em,
    /// Percentage of the parent dimension.
    Percent,
    /// Let layout compute the value. Also the fallback for unknown units.
    #[default]
    AutoCalculate,
}

/// Unit suffix aliases, after separators are stripped and the text lower-cased.
const UNIT_ALIASES: &[(&str, Unit)] = &[
    ("px", Unit::Px),
    ("pt", Unit::Pt),
    ("em", Unit::Em),
    ("percent", Unit::Percent),
    ("pct", Unit::Percent),
    ("%", Unit::Percent),
    ("autocalculate", Unit::AutoCalculate),
    ("auto", Unit::AutoCalculate),
];

impl Unit {
    /// Look up a unit suffix. Returns `None` for anything not in the alias table.
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        UNIT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == suffix)
            .map(|&(_, unit)| unit)
    }
}

/// A numeric layout value with its unit, e.g. `10px`, `50%`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub fn pt(value: f64) -> Self {
        Self::new(value, Unit::Pt)
    }

    pub fn em(value: f64) -> Self {
        Self::new(value, Unit::Em)
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// An auto-calculated dimension with a zero value.
    pub fn auto() -> Self {
        Self::new(0.0, Unit::AutoCalculate)
    }

    /// Returns `true` if layout should compute this value.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::AutoCalculate
    }

    /// Parse a dimension string such as `"10px"`, `"10 px"`, `"2.5_em"` or `"50%"`.
    ///
    /// Whitespace, commas and underscores are removed and the rest is
    /// lower-cased. A leading numeric literal is read (a missing one reads as
    /// zero) and whatever follows is matched against the unit aliases. An
    /// absent or unknown suffix yields [`Unit::AutoCalculate`]; this never fails.
    pub fn parse(input: &str) -> Self {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let (value, rest) = split_number(&cleaned);
        let unit = Unit::from_suffix(rest).unwrap_or_default();
        Self { value, unit }
    }
}

/// Split a leading decimal literal (`[+-]digits[.digits][e[+-]digits]`) off
/// `text`. Returns `0.0` and the whole input when no digits lead.
fn split_number(text: &str) -> (f64, &str) {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return (0.0, text);
    }

    // An exponent only counts when at least one digit follows it, so the
    // `e` of `em` stays part of the unit.
    if end < bytes.len() && bytes[end] == b'e' {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(value) => (value, &text[end..]),
        Err(_) => (0.0, text),
    }
}

/// Parse a four-value shorthand such as `"10px,20px,30px,40px"` or
/// `"(1em 2em 3em 4em)"`.
///
/// Values may be separated by commas and/or whitespace and the whole list may
/// be wrapped in brackets or parentheses. The first four dimension tokens are
/// returned in written order; anything after the fourth is ignored. Fewer than
/// four values, or a stray token before the fourth, is an error carrying the
/// input text.
pub fn parse_quad_coordinates(input: &str) -> Result<[Dimension; 4], DomError> {
    let invalid = || DomError::InvalidQuad(input.to_string());
    let mut lexer = QuadToken::lexer(input);
    let mut values = [Dimension::default(); 4];
    let mut found = 0;
    let mut opened = false;

    while found < 4 {
        match lexer.next() {
            Some(Ok(QuadToken::Dimension)) => {
                values[found] = Dimension::parse(lexer.slice());
                found += 1;
            }
            Some(Ok(QuadToken::Comma)) if found > 0 => {}
            Some(Ok(QuadToken::Open)) if found == 0 && !opened => opened = true,
            _ => return Err(invalid()),
        }
    }

    Ok(values)
}

/// Unit constructors on plain numbers: `10.0.px()`, `1.5.em()`.
pub trait Units {
    fn px(self) -> Dimension;
    fn pt(self) -> Dimension;
    fn em(self) -> Dimension;
    fn percent(self) -> Dimension;
}

impl Units for f64 {
    fn px(self) -> Dimension {
        Dimension::px(self)
    }

    fn pt(self) -> Dimension {
        Dimension::pt(self)
    }

    fn em(self) -> Dimension {
        Dimension::em(self)
    }

    fn percent(self) -> Dimension {
        Dimension::percent(self)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::AutoCalculate => return write!(f, "auto"),
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Em => "em",
            Unit::Percent => "%",
        };
        if self.value.fract() == 0.0 {
            write!(f, "{}{suffix}", self.value as i64)
        } else {
            write!(f, "{}{suffix}", self.value)
        }
    }
}
