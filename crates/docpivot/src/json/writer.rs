//! JSON rendering
//!
//! Compact emission with no introduced whitespace. For any tree produced by
//! the JSON parser this is the exact inverse of parsing.

use crate::content::{float_text, Content, Scalar};

/// Render a content tree as JSON text
pub fn render(content: &Content) -> String {
    let mut out = String::new();
    write_content(content, &mut out);
    out
}

fn write_content(content: &Content, out: &mut String) {
    match content {
        Content::Primitive(scalar) => write_scalar(scalar, out),
        Content::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_content(item, out);
            }
            out.push(']');
        }
        Content::Object(obj) => {
            out.push('{');
            for (i, (key, value)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // keys are escaped exactly like string values
                out.push('"');
                write_escaped(key, out);
                out.push_str("\":");
                write_content(value, out);
            }
            out.push('}');
        }
    }
}

fn write_scalar(scalar: &Scalar, out: &mut String) {
    match scalar {
        Scalar::Null => out.push_str("null"),
        Scalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Scalar::Int(n) => out.push_str(&n.to_string()),
        Scalar::Float(n) => {
            if n.is_finite() {
                out.push_str(&float_text(*n));
            } else {
                // JSON has no representation for NaN or infinity
                out.push_str("null");
            }
        }
        Scalar::Text(s) => {
            out.push('"');
            write_escaped(s, out);
            out.push('"');
        }
    }
}

fn write_escaped(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            ch if ch.is_control() => {
                out.push_str(&format!("\\u{:04x}", u32::from(ch)));
            }
            ch => out.push(ch),
        }
    }
}
