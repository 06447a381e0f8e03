//! Factory and attribute-dispatch tables consulted by the markup compiler.
//!
//! A [`Registry`] maps tag names to element constructors and attribute names
//! to setters. Attribute names are bound either as compound (the setter takes
//! the following value token) or simple (the setter applies a fixed effect and
//! ignores its string argument). A name may carry both bindings.
//!
//! The standard registry is built once per process and shared. A widget layer
//! that needs more tags starts from [`Registry::standard_tables`], registers
//! its own entries and freezes the result in an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::dom::attribute::{Attribute, AttributeKind};
use crate::dom::node::{Element, NodeId};
use crate::dom::Document;
use crate::error::DomError;
use crate::style::color::Color;
use crate::style::dimension::{parse_quad_coordinates, Dimension};
use crate::style::keywords::{Display, LineHeight, LineHeightKind, Position, TextAlignment};

/// Zero-argument element constructor.
pub type Factory = fn() -> Element;

/// Applies an attribute string to an element.
pub type AttributeSetter = fn(&mut Document, NodeId, &str) -> Result<(), DomError>;

/// A resolved attribute binding.
#[derive(Clone, Copy)]
pub struct AttributeEntry {
    /// `true` if the attribute consumes a following value token.
    pub compound: bool,
    pub setter: AttributeSetter,
}

impl fmt::Debug for AttributeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeEntry")
            .field("compound", &self.compound)
            .finish_non_exhaustive()
    }
}

static STANDARD: LazyLock<Arc<Registry>> =
    LazyLock::new(|| Arc::new(Registry::standard_tables()));

/// Tag and attribute tables. Names are stored lower-case.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
    compound: HashMap<String, AttributeSetter>,
    simple: HashMap<String, AttributeSetter>,
}

impl Registry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared standard registry.
    pub fn standard() -> Arc<Registry> {
        Arc::clone(&STANDARD)
    }

    /// A fresh copy of the standard tables, open for extension.
    pub fn standard_tables() -> Self {
        let mut reg = Self::empty();
        register_standard_factories(&mut reg);
        register_standard_attributes(&mut reg);
        reg
    }

    pub fn register_factory(&mut self, tag: &str, factory: Factory) -> &mut Self {
        self.factories.insert(tag.to_lowercase(), factory);
        self
    }

    pub fn register_attribute(
        &mut self,
        name: &str,
        compound: bool,
        setter: AttributeSetter,
    ) -> &mut Self {
        let table = if compound {
            &mut self.compound
        } else {
            &mut self.simple
        };
        table.insert(name.to_lowercase(), setter);
        self
    }

    /// Constructor for a lower-case tag name.
    pub fn factory(&self, tag: &str) -> Option<Factory> {
        self.factories.get(tag).copied()
    }

    pub fn has_factory(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Binding for a lower-case attribute name. When a name is bound both
    /// ways, `prefer_compound` picks which binding wins.
    pub fn attribute(&self, name: &str, prefer_compound: bool) -> Option<AttributeEntry> {
        let compound = || {
            self.compound.get(name).map(|&setter| AttributeEntry {
                compound: true,
                setter,
            })
        };
        let simple = || {
            self.simple.get(name).map(|&setter| AttributeEntry {
                compound: false,
                setter,
            })
        };
        if prefer_compound {
            compound().or_else(simple)
        } else {
            simple().or_else(compound)
        }
    }

    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.compound.len() + self.simple.len()
    }
}

fn sorted_names<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("factories", &sorted_names(&self.factories))
            .field("compound", &sorted_names(&self.compound))
            .field("simple", &sorted_names(&self.simple))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Standard tables
// ---------------------------------------------------------------------------

fn register_standard_factories(reg: &mut Registry) {
    reg.register_factory("br", || Element::new("br"))
        .register_factory("h1", || Element::new("h1"))
        .register_factory("h2", || Element::new("h2"))
        .register_factory("h3", || Element::new("h3"))
        .register_factory("paragraph", || Element::new("paragraph"))
        .register_factory("p", || Element::new("p"))
        .register_factory("div", || Element::new("div"))
        .register_factory("span", || Element::new("span"))
        .register_factory("ul", || Element::new("ul"))
        .register_factory("ol", || Element::new("ol"))
        .register_factory("li", || Element::new("li"))
        .register_factory("image", || Element::new("image"));
}

macro_rules! dimension_setter {
    ($variant:ident) => {
        |doc: &mut Document, node: NodeId, value: &str| {
            doc.set_attribute(node, Attribute::$variant(Dimension::parse(value)))
        }
    };
}

macro_rules! color_setter {
    ($variant:ident) => {
        |doc: &mut Document, node: NodeId, value: &str| {
            doc.set_attribute(node, Attribute::$variant(Color::parse(value)))
        }
    };
}

macro_rules! string_setter {
    ($variant:ident) => {
        |doc: &mut Document, node: NodeId, value: &str| {
            doc.set_attribute(node, Attribute::$variant(value.to_owned()))
        }
    };
}

macro_rules! keyword_setter {
    ($variant:ident) => {
        |doc: &mut Document, node: NodeId, value: &str| {
            doc.set_attribute(node, Attribute::$variant(value.parse()?))
        }
    };
}

macro_rules! fixed_setter {
    ($attr:expr) => {
        |doc: &mut Document, node: NodeId, _: &str| doc.set_attribute(node, $attr)
    };
}

/// Parse a quad shorthand before touching the element, so a bad string sets
/// nothing.
fn set_quad(
    doc: &mut Document,
    node: NodeId,
    value: &str,
    build: [fn(Dimension) -> Attribute; 4],
) -> Result<(), DomError> {
    let quad = parse_quad_coordinates(value)?;
    doc.element(node)?;
    doc.set_attributes(node, build.iter().zip(quad).map(|(make, dim)| make(dim)))
}

/// Switch the line height interpretation, keeping any stored value.
fn set_line_height_kind(
    doc: &mut Document,
    node: NodeId,
    kind: LineHeightKind,
) -> Result<(), DomError> {
    let value = match doc.attribute(node, AttributeKind::LineHeight) {
        Some(Attribute::LineHeight(current)) => current.value,
        _ if kind == LineHeightKind::Numeric => 1.0,
        _ => 0.0,
    };
    doc.set_attribute(node, Attribute::LineHeight(LineHeight { value, kind }))
}

fn register_standard_attributes(reg: &mut Registry) {
    // Compound
    reg.register_attribute("id", true, string_setter!(IndexBy))
        .register_attribute("indexby", true, string_setter!(IndexBy))
        .register_attribute("display", true, keyword_setter!(Display))
        .register_attribute("position", true, keyword_setter!(Position))
        .register_attribute("objecttop", true, dimension_setter!(ObjectTop))
        .register_attribute("top", true, dimension_setter!(ObjectTop))
        .register_attribute("objectleft", true, dimension_setter!(ObjectLeft))
        .register_attribute("left", true, dimension_setter!(ObjectLeft))
        .register_attribute("objectheight", true, dimension_setter!(ObjectHeight))
        .register_attribute("height", true, dimension_setter!(ObjectHeight))
        .register_attribute("objectwidth", true, dimension_setter!(ObjectWidth))
        .register_attribute("width", true, dimension_setter!(ObjectWidth))
        .register_attribute("coordinates", true, |doc, node, value| {
            set_quad(
                doc,
                node,
                value,
                [
                    Attribute::ObjectTop,
                    Attribute::ObjectLeft,
                    Attribute::ObjectHeight,
                    Attribute::ObjectWidth,
                ],
            )
        })
        .register_attribute("scrolltop", true, dimension_setter!(ScrollTop))
        .register_attribute("scrollleft", true, dimension_setter!(ScrollLeft))
        .register_attribute("background", true, color_setter!(Background))
        .register_attribute("opacity", true, |doc, node, value| {
            doc.set_attribute(node, Attribute::Opacity(Dimension::parse(value).value))
        })
        .register_attribute("textface", true, string_setter!(TextFace))
        .register_attribute("textsize", true, dimension_setter!(TextSize))
        .register_attribute("textweight", true, string_setter!(TextWeight))
        .register_attribute("weight", true, string_setter!(TextWeight))
        .register_attribute("textcolor", true, color_setter!(TextColor))
        .register_attribute("color", true, color_setter!(TextColor))
        .register_attribute("textalignment", true, keyword_setter!(TextAlignment))
        .register_attribute("textindent", true, dimension_setter!(TextIndent))
        .register_attribute("indent", true, dimension_setter!(TextIndent))
        .register_attribute("tabsize", true, dimension_setter!(TabSize))
        .register_attribute("tab", true, dimension_setter!(TabSize))
        .register_attribute("lineheight", true, keyword_setter!(LineHeight))
        .register_attribute("margintop", true, dimension_setter!(MarginTop))
        .register_attribute("marginleft", true, dimension_setter!(MarginLeft))
        .register_attribute("marginbottom", true, dimension_setter!(MarginBottom))
        .register_attribute("marginright", true, dimension_setter!(MarginRight))
        .register_attribute("margin", true, |doc, node, value| {
            set_quad(
                doc,
                node,
                value,
                [
                    Attribute::MarginTop,
                    Attribute::MarginLeft,
                    Attribute::MarginBottom,
                    Attribute::MarginRight,
                ],
            )
        })
        .register_attribute("paddingtop", true, dimension_setter!(PaddingTop))
        .register_attribute("paddingleft", true, dimension_setter!(PaddingLeft))
        .register_attribute("paddingbottom", true, dimension_setter!(PaddingBottom))
        .register_attribute("paddingright", true, dimension_setter!(PaddingRight))
        .register_attribute("padding", true, |doc, node, value| {
            set_quad(
                doc,
                node,
                value,
                [
                    Attribute::PaddingTop,
                    Attribute::PaddingLeft,
                    Attribute::PaddingBottom,
                    Attribute::PaddingRight,
                ],
            )
        })
        .register_attribute("borderstyle", true, keyword_setter!(BorderStyle))
        .register_attribute("borderwidth", true, dimension_setter!(BorderWidth))
        .register_attribute("bordercolor", true, color_setter!(BorderColor))
        .register_attribute("borderradius", true, dimension_setter!(BorderRadius))
        .register_attribute("focusindex", true, string_setter!(FocusIndex))
        .register_attribute("focus", true, string_setter!(FocusIndex))
        .register_attribute("zindex", true, string_setter!(ZIndex))
        .register_attribute("liststyletype", true, keyword_setter!(ListStyleType));

    // Simple
    reg.register_attribute("block", false, fixed_setter!(Attribute::Display(Display::Block)))
        .register_attribute("inline", false, fixed_setter!(Attribute::Display(Display::Inline)))
        .register_attribute("hidden", false, fixed_setter!(Attribute::Display(Display::None)))
        .register_attribute(
            "absolute",
            false,
            fixed_setter!(Attribute::Position(Position::Absolute)),
        )
        .register_attribute(
            "relative",
            false,
            fixed_setter!(Attribute::Position(Position::Relative)),
        )
        .register_attribute(
            "left",
            false,
            fixed_setter!(Attribute::TextAlignment(TextAlignment::Left)),
        )
        .register_attribute(
            "center",
            false,
            fixed_setter!(Attribute::TextAlignment(TextAlignment::Center)),
        )
        .register_attribute(
            "right",
            false,
            fixed_setter!(Attribute::TextAlignment(TextAlignment::Right)),
        )
        .register_attribute(
            "justified",
            false,
            fixed_setter!(Attribute::TextAlignment(TextAlignment::Justified)),
        )
        .register_attribute("normal", false, |doc, node, _| {
            set_line_height_kind(doc, node, LineHeightKind::Normal)
        })
        .register_attribute("numeric", false, |doc, node, _| {
            set_line_height_kind(doc, node, LineHeightKind::Numeric)
        });
}
