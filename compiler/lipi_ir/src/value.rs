//! Mapping values: the tagged union behind scheme rule declarations.

use std::fmt;

use smallvec::SmallVec;

/// One side of a declared mapping pair.
///
/// Scalars are strings or integers; groups are (possibly nested) lists used
/// for possibility patterns and multi-value tuples.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    Str(String),
    Int(i64),
    Group(Vec<Value>),
}

impl Value {
    /// Whether this value is a group.
    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }

    /// Scalar text of a leaf value; `None` for groups.
    ///
    /// Integers render in decimal, matching how authors write bare numerals.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Group(_) => None,
        }
    }

    /// Collect all scalar leaves, flattening nested groups depth-first.
    pub fn leaves(&self) -> SmallVec<[&Value; 4]> {
        let mut out = SmallVec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut SmallVec<[&'a Value; 4]>) {
        match self {
            Value::Group(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Int(n) => write!(f, "{n}"),
            Value::Group(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for Value {
    /// Top-level scalars render bare; groups render in list notation with
    /// quoted strings, the way scheme authors wrote them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Group(_) => self.fmt_nested(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

/// The expression context string attached to diagnostics: `<key> => <value>`.
pub fn expression(key: &Value, value: &Value) -> String {
    format!("{key} => {value}")
}

/// An ordered sequence of declared key/value pairs.
///
/// Duplicate keys are allowed here; the store decides what a duplicate means.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Mapping {
    pub pairs: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Mapping { pairs: Vec::new() }
    }

    pub fn from_pairs(pairs: Vec<(Value, Value)>) -> Self {
        Mapping { pairs }
    }

    pub fn push(&mut self, key: Value, value: Value) {
        self.pairs.push((key, value));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Value, Value)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a (Value, Value);
    type IntoIter = std::slice::Iter<'a, (Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_text() {
        assert_eq!(Value::from("ka").scalar_text(), Some("ka".to_string()));
        assert_eq!(Value::from(9).scalar_text(), Some("9".to_string()));
        assert_eq!(Value::Group(vec![]).scalar_text(), None);
    }

    #[test]
    fn test_leaves_flattens_nested_groups() {
        let value = Value::Group(vec![
            Value::from("a"),
            Value::Group(vec![Value::from("b"), Value::Group(vec![Value::from("c")])]),
            Value::from(4),
        ]);
        let leaves: Vec<String> = value
            .leaves()
            .iter()
            .filter_map(|v| v.scalar_text())
            .collect();
        assert_eq!(leaves, vec!["a", "b", "c", "4"]);
    }

    #[test]
    fn test_leaves_of_scalar_is_itself() {
        let value = Value::from("x");
        assert_eq!(value.leaves().len(), 1);
    }

    #[test]
    fn test_display_top_level_scalars_are_bare() {
        assert_eq!(Value::from("aa").to_string(), "aa");
        assert_eq!(Value::from(-3).to_string(), "-3");
    }

    #[test]
    fn test_display_groups_quote_strings() {
        let group = Value::Group(vec![Value::from("aa"), Value::from("A")]);
        assert_eq!(group.to_string(), "[\"aa\", \"A\"]");

        let nested = Value::Group(vec![Value::from("a"), Value::Group(vec![Value::from(1)])]);
        assert_eq!(nested.to_string(), "[\"a\", [1]]");
    }

    #[test]
    fn test_expression_format() {
        let key = Value::Group(vec![Value::from("aa"), Value::from("A")]);
        let value = Value::from("X");
        assert_eq!(expression(&key, &value), "[\"aa\", \"A\"] => X");
    }

    #[test]
    fn test_mapping_push_and_iter() {
        let mut mapping = Mapping::new();
        assert!(mapping.is_empty());
        mapping.push(Value::from("a"), Value::from("b"));
        mapping.push(Value::from("c"), Value::from(1));
        assert_eq!(mapping.len(), 2);
        let keys: Vec<String> = mapping.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
