//! Named style definitions: ordered lists of attributes applied together.

use crate::dom::attribute::Attribute;

/// A named, ordered attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDef {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// Ordered collection of style definitions. Names are unique; redefining a
/// name replaces its attributes in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    styles: Vec<StyleDef>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, attributes: Vec<Attribute>) {
        let name = name.into();
        match self.styles.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.attributes = attributes,
            None => self.styles.push(StyleDef { name, attributes }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleDef> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<StyleDef> {
        let pos = self.styles.iter().position(|s| s.name == name)?;
        Some(self.styles.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDef> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::Color;
    use crate::style::dimension::Dimension;

    #[test]
    fn define_and_get() {
        let mut table = StyleTable::new();
        table.define("warning", vec![Attribute::TextColor(Color::from_rgb(0xFF0000))]);
        let def = table.get("warning").unwrap();
        assert_eq!(def.attributes.len(), 1);
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn redefine_keeps_position() {
        let mut table = StyleTable::new();
        table.define("a", vec![]);
        table.define("b", vec![]);
        table.define("a", vec![Attribute::TextSize(Dimension::pt(12.0))]);
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.get("a").unwrap().attributes.len(), 1);
    }

    #[test]
    fn remove_definition() {
        let mut table = StyleTable::new();
        table.define("a", vec![]);
        assert!(table.remove("a").is_some());
        assert!(table.remove("a").is_none());
        assert!(table.is_empty());
    }
}
