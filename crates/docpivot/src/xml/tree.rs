//! Mapping a parsed XML document onto the content tree
//!
//! Shape rules:
//! - The document becomes a single-member object `{"#declaration": {...}}`;
//!   the declaration object holds an `#attributes` bag (when the document
//!   carried a `<?xml?>` prolog) and the root element under its tag name.
//! - An element always becomes an object. Attributes go into `#attributes`,
//!   text into `#text`, comments under `#comment`, CDATA under
//!   `#cdata-section`; an empty element becomes an empty object.
//! - Sibling elements sharing a tag name collapse into one member: a single
//!   occurrence stays a bare object, two or more become an array of objects.
//!   Arrays built here therefore only ever hold objects, which is what the
//!   writer demands when rendering an array back to repeated tags.

use super::model::{Document, Element, Node};
use crate::content::{float_text, Content, Object, Scalar};
use crate::reserved;

/// Convert a parsed document into a content tree
pub fn document_to_content(doc: &Document) -> Content {
    let mut decl = Object::new();
    if let Some(declaration) = &doc.declaration {
        let mut bag = Object::new();
        for (name, value) in &declaration.attributes {
            bag.insert(name, Scalar::Text(value.clone()));
        }
        decl.insert(reserved::ATTRIBUTES, bag);
    }
    decl.insert(&doc.root.name, element_to_content(&doc.root));

    let mut root = Object::new();
    root.insert(reserved::DECLARATION, decl);
    Content::Object(root)
}

fn element_to_content(element: &Element) -> Content {
    let mut text = String::new();
    let mut has_text = false;
    for child in &element.children {
        if let Node::Text(t) = child {
            text.push_str(t);
            has_text = true;
        }
    }

    let mut obj = Object::new();
    if !element.attributes.is_empty() {
        let mut bag = Object::new();
        for (name, value) in &element.attributes {
            bag.insert(name, Scalar::Text(value.clone()));
        }
        obj.insert(reserved::ATTRIBUTES, bag);
    }
    if has_text {
        obj.insert(reserved::TEXT, Content::Primitive(coerce_text(&text)));
    }

    for child in &element.children {
        match child {
            Node::Text(_) => {}
            Node::Element(el) => {
                insert_grouped(&mut obj, &el.name, element_to_content(el));
            }
            Node::Comment(body) => {
                insert_grouped(&mut obj, reserved::COMMENT, Scalar::Text(body.clone()).into());
            }
            Node::CData(body) => {
                insert_grouped(&mut obj, reserved::CDATA, Scalar::Text(body.clone()).into());
            }
        }
    }

    Content::Object(obj)
}

/// Insert under `key`, promoting to an array on the second occurrence.
/// Array promotion happens only through repetition, so an existing array
/// under the key is always ours to extend.
fn insert_grouped(obj: &mut Object, key: &str, value: Content) {
    match obj.get_mut(key) {
        None => {
            obj.insert(key, value);
        }
        Some(Content::Array(arr)) => arr.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Content::null());
            *existing = Content::Array(vec![first, value].into());
        }
    }
}

/// Coerce element text to a typed primitive, but only when rendering the
/// coerced value reproduces the source bytes exactly. "007" and "1e3" stay
/// text; "7", "true" and "2.5" become typed.
fn coerce_text(text: &str) -> Scalar {
    match text {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }
    if let Ok(n) = text.parse::<i64>() {
        if n.to_string() == text {
            return Scalar::Int(n);
        }
    }
    if let Ok(n) = text.parse::<f64>() {
        if n.is_finite() && float_text(n) == text {
            return Scalar::Float(n);
        }
    }
    Scalar::Text(text.to_string())
}
