//! Auxiliary data channels: appendable, type-keyed payload sequences.
//!
//! Data is distinct from attributes. Setting a data value appends to the
//! channel of its type; nothing is ever overwritten.

use super::attribute::Attribute;

/// A payload value routed into a data channel.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Char(char),
    Number(f64),
    Integer(i64),
    Text(String),
    Chars(Vec<char>),
    Numbers(Vec<f64>),
    Integers(Vec<i64>),
    Texts(Vec<String>),
    /// Table rows of string cells.
    Rows(Vec<Vec<String>>),
    /// Keyed strings, e.g. list items with a value.
    Pairs(Vec<(i64, String)>),
}

/// The data channels of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataChannels {
    pub chars: Vec<char>,
    pub numbers: Vec<f64>,
    pub integers: Vec<i64>,
    pub strings: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub pairs: Vec<(i64, String)>,
}

impl DataChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the channel of its type.
    pub fn append(&mut self, value: DataValue) {
        match value {
            DataValue::Char(c) => self.chars.push(c),
            DataValue::Number(n) => self.numbers.push(n),
            DataValue::Integer(i) => self.integers.push(i),
            DataValue::Text(s) => self.strings.push(s),
            DataValue::Chars(v) => self.chars.extend(v),
            DataValue::Numbers(v) => self.numbers.extend(v),
            DataValue::Integers(v) => self.integers.extend(v),
            DataValue::Texts(v) => self.strings.extend(v),
            DataValue::Rows(v) => self.rows.extend(v),
            DataValue::Pairs(v) => self.pairs.extend(v),
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.numbers.clear();
        self.integers.clear();
        self.strings.clear();
        self.rows.clear();
        self.pairs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
            && self.numbers.is_empty()
            && self.integers.is_empty()
            && self.strings.is_empty()
            && self.rows.is_empty()
            && self.pairs.is_empty()
    }
}

/// Anything `Document::set_attribute` accepts: a stored attribute or a
/// payload value for a data channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Attr(Attribute),
    Data(DataValue),
}

impl From<Attribute> for Setting {
    fn from(attr: Attribute) -> Self {
        Setting::Attr(attr)
    }
}

impl From<DataValue> for Setting {
    fn from(value: DataValue) -> Self {
        Setting::Data(value)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl From<char> for DataValue {
    fn from(c: char) -> Self {
        DataValue::Char(c)
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        DataValue::Number(n)
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Integer(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_routes_by_type() {
        let mut data = DataChannels::new();
        data.append("hello".into());
        data.append('x'.into());
        data.append(2.5.into());
        data.append(7i64.into());
        assert_eq!(data.strings, vec!["hello"]);
        assert_eq!(data.chars, vec!['x']);
        assert_eq!(data.numbers, vec![2.5]);
        assert_eq!(data.integers, vec![7]);
    }

    #[test]
    fn append_never_overwrites() {
        let mut data = DataChannels::new();
        data.append(DataValue::Text("a".into()));
        data.append(DataValue::Texts(vec!["b".into(), "c".into()]));
        assert_eq!(data.strings, vec!["a", "b", "c"]);
    }

    #[test]
    fn rows_and_pairs() {
        let mut data = DataChannels::new();
        data.append(DataValue::Rows(vec![vec!["x".into(), "y".into()]]));
        data.append(DataValue::Pairs(vec![(1, "one".into())]));
        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.pairs, vec![(1, "one".to_string())]);
    }

    #[test]
    fn clear_empties_every_channel() {
        let mut data = DataChannels::new();
        data.append(DataValue::Chars(vec!['a', 'b']));
        data.append(DataValue::Numbers(vec![1.0]));
        assert!(!data.is_empty());
        data.clear();
        assert!(data.is_empty());
    }
}
