//! The format-agnostic content tree all codecs read and write
//!
//! A parsed document is a finite, acyclic tree of [`Content`] nodes:
//! primitives at the leaves, arrays and order-preserving objects as
//! containers. All format logic lives in the codecs; this module is pure
//! structure.

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;
use std::ops::Index;

/// Scalar payload of a primitive node
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Scalar {
    /// Absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Natural text form shared by both codecs: null is empty, strings are
    /// unquoted, numbers and booleans use their canonical rendering.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => float_text(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Canonical float rendering: integral finite values keep a `.0` suffix so
/// a float never re-parses as an integer.
pub(crate) fn float_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}

/// A node of the content tree
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Leaf node holding a scalar
    Primitive(Scalar),
    /// Ordered sequence of nodes
    Array(Array),
    /// Ordered mapping from string keys to nodes
    Object(Object),
}

impl Default for Content {
    fn default() -> Self {
        Self::Primitive(Scalar::Null)
    }
}

impl Content {
    /// Null primitive
    pub const fn null() -> Self {
        Self::Primitive(Scalar::Null)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Primitive(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<Scalar> for Content {
    fn from(value: Scalar) -> Self {
        Self::Primitive(value)
    }
}

impl From<bool> for Content {
    fn from(value: bool) -> Self {
        Self::Primitive(Scalar::Bool(value))
    }
}

impl From<i64> for Content {
    fn from(value: i64) -> Self {
        Self::Primitive(Scalar::Int(value))
    }
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Self::Primitive(Scalar::Float(value))
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Primitive(Scalar::Text(value.to_owned()))
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Primitive(Scalar::Text(value))
    }
}

impl From<Array> for Content {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Content {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Content>> for Content {
    fn from(values: Vec<Content>) -> Self {
        Self::Array(Array(values))
    }
}

impl From<IndexMap<String, Content>> for Content {
    fn from(map: IndexMap<String, Content>) -> Self {
        Self::Object(Object(map))
    }
}

/// An order-preserving object (insertion order is significant for
/// serialization)
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Object(pub(crate) IndexMap<String, Content>);

impl Object {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Content> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Content> {
        self.0.get_mut(key)
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Content>) -> Option<Content> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Content> {
        self.0.swap_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> Keys<'_, String, Content> {
        self.0.keys()
    }

    pub fn values(&self) -> Values<'_, String, Content> {
        self.0.values()
    }

    pub fn iter(&self) -> Iter<'_, String, Content> {
        self.0.iter()
    }
}

impl Index<&str> for Object {
    type Output = Content;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Content);
    type IntoIter = Iter<'a, String, Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Content);
    type IntoIter = IntoIter<String, Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IndexMap<String, Content>> for Object {
    fn from(map: IndexMap<String, Content>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Content)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Content)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

/// An ordered array of nodes
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Array(pub(crate) Vec<Content>);

impl Array {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Content> {
        self.0.get(index)
    }

    pub fn push(&mut self, value: impl Into<Content>) {
        self.0.push(value.into());
    }

    pub fn pop(&mut self) -> Option<Content> {
        self.0.pop()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Content> {
        self.0.iter()
    }
}

impl Index<usize> for Array {
    type Output = Content;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Content;
    type IntoIter = std::slice::Iter<'a, Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Array {
    type Item = Content;
    type IntoIter = std::vec::IntoIter<Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Content>> for Array {
    fn from(values: Vec<Content>) -> Self {
        Self(values)
    }
}

impl FromIterator<Content> for Array {
    fn from_iter<I: IntoIterator<Item = Content>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

/// Structural comparison that treats object key order as insignificant.
///
/// Serialization tests compare rendered bytes instead; this is for semantic
/// round-trip assertions.
pub fn semantic_eq(left: &Content, right: &Content) -> bool {
    match (left, right) {
        (Content::Object(l), Content::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(k, v)| r.get(k).is_some_and(|rv| semantic_eq(v, rv)))
        }
        (Content::Array(l), Content::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r.iter()).all(|(lv, rv)| semantic_eq(lv, rv))
        }
        (Content::Primitive(l), Content::Primitive(r)) => match (l, r) {
            (Scalar::Float(l), Scalar::Float(r)) => l == r || (l.is_nan() && r.is_nan()),
            _ => l == r,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_predicates() {
        assert!(Content::null().is_primitive());
        assert!(!Content::null().is_array());
        assert!(Content::Array(Array::new()).is_array());
        assert!(Content::Object(Object::new()).is_object());
    }

    #[test]
    fn test_content_accessors() {
        let content = Content::from(42i64);
        assert_eq!(content.as_scalar().and_then(Scalar::as_int), Some(42));
        assert_eq!(content.as_array(), None);
        assert_eq!(content.as_object(), None);

        let content = Content::from("hello");
        assert_eq!(
            content.as_scalar().and_then(Scalar::as_text),
            Some("hello")
        );
    }

    #[test]
    fn test_object_order_preservation() {
        let mut obj = Object::new();
        obj.insert("first", 1i64);
        obj.insert("second", 2i64);
        obj.insert("third", 3i64);

        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_object_insert_replaces_in_place() {
        let mut obj = Object::new();
        obj.insert("a", 1i64);
        obj.insert("b", 2i64);
        obj.insert("a", 3i64);

        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj["a"], Content::from(3i64));
    }

    #[test]
    fn test_array_order() {
        let mut arr = Array::new();
        arr.push(1i64);
        arr.push("two");
        arr.push(3.0f64);

        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0], Content::from(1i64));
        assert_eq!(arr[1], Content::from("two"));
    }

    #[test]
    fn test_scalar_to_text() {
        assert_eq!(Scalar::Null.to_text(), "");
        assert_eq!(Scalar::Bool(true).to_text(), "true");
        assert_eq!(Scalar::Int(-7).to_text(), "-7");
        assert_eq!(Scalar::Float(2.5).to_text(), "2.5");
        assert_eq!(Scalar::Text("raw".to_string()).to_text(), "raw");
    }

    #[test]
    fn test_float_text_keeps_fraction_marker() {
        assert_eq!(float_text(1.0), "1.0");
        assert_eq!(float_text(-3.0), "-3.0");
        assert_eq!(float_text(2.5), "2.5");
    }

    #[test]
    fn test_semantic_eq_ignores_key_order() {
        let mut left = Object::new();
        left.insert("a", 1i64);
        left.insert("b", 2i64);

        let mut right = Object::new();
        right.insert("b", 2i64);
        right.insert("a", 1i64);

        assert!(semantic_eq(&Content::Object(left), &Content::Object(right)));
    }

    #[test]
    fn test_semantic_eq_array_order_significant() {
        let left = Content::from(vec![Content::from(1i64), Content::from(2i64)]);
        let right = Content::from(vec![Content::from(2i64), Content::from(1i64)]);
        assert!(!semantic_eq(&left, &right));
    }

    #[test]
    fn test_semantic_eq_distinguishes_int_and_float() {
        let left = Content::from(1i64);
        let right = Content::from(1.0f64);
        assert!(!semantic_eq(&left, &right));
    }
}
