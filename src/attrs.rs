//! Node and edge attributes

use std::collections::BTreeMap;

/// Attribute map attached to every node and edge.
///
/// Keys come from fixed builder attributes and from whatever columns the
/// feature table declares, so there is no static schema.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Value of a single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Int(i64),
    Str(String),
}

impl AttrValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

/// `weight`/`color` every segment node and intra-segment edge starts with
pub fn segment_defaults() -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("weight".to_string(), AttrValue::Int(5));
    attrs.insert("color".to_string(), AttrValue::from("black"));
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_defaults() {
        let attrs = segment_defaults();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["weight"], AttrValue::Int(5));
        assert_eq!(attrs["color"], AttrValue::from("black"));
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(AttrValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(AttrValue::from("3.5").as_f64(), Some(3.5));
        assert_eq!(AttrValue::from("thick").as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(AttrValue::Int(5).to_string(), "5");
        assert_eq!(AttrValue::from("green").to_string(), "green");
    }
}
