//! Typed attribute values and the per-element attribute map.
//!
//! [`Attribute`] is a closed tagged union; every value carries its own
//! [`AttributeKind`], which is the key it is stored under. Setting an
//! attribute of a kind that is already present overwrites it.

use std::collections::BTreeMap;

use crate::style::color::Color;
use crate::style::dimension::Dimension;
use crate::style::keywords::{
    BorderStyle, Display, LineHeight, ListStyleType, Position, TextAlignment,
};

macro_rules! attributes {
    ($($(#[$doc:meta])* $name:ident($ty:ty)),* $(,)?) => {
        /// A single typed, overwritable element property.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Attribute {
            $($(#[$doc])* $name($ty),)*
        }

        /// The key an [`Attribute`] is stored under.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum AttributeKind {
            $($name,)*
        }

        impl Attribute {
            pub fn kind(&self) -> AttributeKind {
                match self {
                    $(Attribute::$name(_) => AttributeKind::$name,)*
                }
            }
        }
    };
}

attributes! {
    /// The element's index key. Maintained in the document's key index.
    IndexBy(String),
    FocusIndex(String),
    ZIndex(String),
    Display(Display),
    Position(Position),
    ObjectTop(Dimension),
    ObjectLeft(Dimension),
    ObjectHeight(Dimension),
    ObjectWidth(Dimension),
    ScrollTop(Dimension),
    ScrollLeft(Dimension),
    Background(Color),
    /// 0.0 (transparent) to 1.0 (opaque).
    Opacity(f64),
    TextFace(String),
    TextSize(Dimension),
    TextWeight(String),
    TextColor(Color),
    TextAlignment(TextAlignment),
    TextIndent(Dimension),
    TabSize(Dimension),
    LineHeight(LineHeight),
    MarginTop(Dimension),
    MarginLeft(Dimension),
    MarginBottom(Dimension),
    MarginRight(Dimension),
    PaddingTop(Dimension),
    PaddingLeft(Dimension),
    PaddingBottom(Dimension),
    PaddingRight(Dimension),
    BorderStyle(BorderStyle),
    BorderWidth(Dimension),
    BorderColor(Color),
    BorderRadius(Dimension),
    ListStyleType(ListStyleType),
}

impl Attribute {
    /// The dimension carried by layout-numeric attributes.
    pub fn dimension(&self) -> Option<Dimension> {
        match *self {
            Attribute::ObjectTop(d)
            | Attribute::ObjectLeft(d)
            | Attribute::ObjectHeight(d)
            | Attribute::ObjectWidth(d)
            | Attribute::ScrollTop(d)
            | Attribute::ScrollLeft(d)
            | Attribute::TextSize(d)
            | Attribute::TextIndent(d)
            | Attribute::TabSize(d)
            | Attribute::MarginTop(d)
            | Attribute::MarginLeft(d)
            | Attribute::MarginBottom(d)
            | Attribute::MarginRight(d)
            | Attribute::PaddingTop(d)
            | Attribute::PaddingLeft(d)
            | Attribute::PaddingBottom(d)
            | Attribute::PaddingRight(d)
            | Attribute::BorderWidth(d)
            | Attribute::BorderRadius(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable access to the dimension of a layout-numeric attribute.
    pub fn dimension_mut(&mut self) -> Option<&mut Dimension> {
        match self {
            Attribute::ObjectTop(d)
            | Attribute::ObjectLeft(d)
            | Attribute::ObjectHeight(d)
            | Attribute::ObjectWidth(d)
            | Attribute::ScrollTop(d)
            | Attribute::ScrollLeft(d)
            | Attribute::TextSize(d)
            | Attribute::TextIndent(d)
            | Attribute::TabSize(d)
            | Attribute::MarginTop(d)
            | Attribute::MarginLeft(d)
            | Attribute::MarginBottom(d)
            | Attribute::MarginRight(d)
            | Attribute::PaddingTop(d)
            | Attribute::PaddingLeft(d)
            | Attribute::PaddingBottom(d)
            | Attribute::PaddingRight(d)
            | Attribute::BorderWidth(d)
            | Attribute::BorderRadius(d) => Some(d),
            _ => None,
        }
    }
}

/// Attributes of one element, keyed and ordered by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: BTreeMap<AttributeKind, Attribute>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `attr`, returning the value it replaced.
    pub fn insert(&mut self, attr: Attribute) -> Option<Attribute> {
        self.entries.insert(attr.kind(), attr)
    }

    pub fn get(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.entries.get(&kind)
    }

    pub fn get_mut(&mut self, kind: AttributeKind) -> Option<&mut Attribute> {
        self.entries.get_mut(&kind)
    }

    pub fn remove(&mut self, kind: AttributeKind) -> Option<Attribute> {
        self.entries.remove(&kind)
    }

    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }
}
