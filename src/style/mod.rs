//! Attribute value parsers: dimensions, colors, enumerated keywords, plus the
//! named style table.

pub mod color;
pub mod dimension;
pub mod keywords;
pub mod table;
pub mod tokenizer;

pub use color::Color;
pub use dimension::{parse_quad_coordinates, Dimension, Unit, Units};
pub use keywords::{
    BorderStyle, Display, Keyword, LineHeight, LineHeightKind, ListStyleType, Position,
    TextAlignment,
};
pub use table::{StyleDef, StyleTable};
