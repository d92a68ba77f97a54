//! XML rendering
//!
//! The inverse of [`crate::xml::tree`]: the tree must be a single-member
//! object wrapping the document under `#declaration`, otherwise rendering
//! fails with a structure error. Reserved marker keys other than
//! `#attributes` and `#text` are skipped, so comments and CDATA captured at
//! parse time do not survive re-emission.

use crate::content::{Content, Object};
use crate::error::{Error, Result, StructureErrorKind};
use crate::reserved;

/// Render a content tree as XML text
pub fn render(content: &Content) -> Result<String> {
    let root = content
        .as_object()
        .ok_or_else(|| Error::structure(StructureErrorKind::NonObjectRoot))?;
    if root.len() != 1 {
        return Err(Error::structure(StructureErrorKind::MissingDeclaration));
    }
    let decl = root
        .get(reserved::DECLARATION)
        .ok_or_else(|| Error::structure(StructureErrorKind::MissingDeclaration))?;
    let decl = decl
        .as_object()
        .ok_or_else(|| Error::structure(StructureErrorKind::NonObjectRoot))?;

    let mut out = String::new();
    // the prolog is emitted only when the declaration carries attributes,
    // so a declaration-less document round-trips without gaining one
    if decl.get(reserved::ATTRIBUTES).is_some() {
        out.push_str("<?xml");
        write_attributes(decl, &mut out)?;
        out.push_str("?>");
    }
    write_members(reserved::DECLARATION, decl, &mut out)?;
    Ok(out)
}

/// Emit the members of an element object: `#text` inline, other reserved
/// markers skipped, everything else as child elements
fn write_members(tag: &str, obj: &Object, out: &mut String) -> Result<()> {
    for (key, value) in obj {
        if key == reserved::TEXT {
            let Content::Primitive(scalar) = value else {
                return Err(Error::structure(StructureErrorKind::NonPrimitiveText {
                    tag: tag.to_string(),
                }));
            };
            escape_text(&scalar.to_text(), out);
        } else if reserved::is_reserved(key) {
            continue;
        } else {
            write_member(key, value, out)?;
        }
    }
    Ok(())
}

fn write_member(tag: &str, value: &Content, out: &mut String) -> Result<()> {
    match value {
        Content::Primitive(scalar) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            escape_text(&scalar.to_text(), out);
            write_close(tag, out);
        }
        Content::Object(obj) => write_element(tag, obj, out)?,
        Content::Array(arr) => {
            // one tagged element per array item; the tree builder only ever
            // puts objects in element arrays, so anything else is a tree
            // that cannot have come from XML
            for item in arr {
                let Content::Object(obj) = item else {
                    return Err(Error::structure(
                        StructureErrorKind::NonObjectArrayElement {
                            tag: tag.to_string(),
                        },
                    ));
                };
                write_element(tag, obj, out)?;
            }
        }
    }
    Ok(())
}

fn write_element(tag: &str, obj: &Object, out: &mut String) -> Result<()> {
    out.push('<');
    out.push_str(tag);
    write_attributes(obj, out)?;
    out.push('>');
    write_members(tag, obj, out)?;
    write_close(tag, out);
    Ok(())
}

fn write_close(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Emit the `#attributes` bag of `obj`, if any. Null attributes are
/// omitted entirely rather than rendered as empty strings.
fn write_attributes(obj: &Object, out: &mut String) -> Result<()> {
    let Some(bag) = obj.get(reserved::ATTRIBUTES) else {
        return Ok(());
    };
    let bag = bag
        .as_object()
        .ok_or_else(|| Error::structure(StructureErrorKind::NonObjectAttributeBag))?;
    for (name, value) in bag {
        let Content::Primitive(scalar) = value else {
            return Err(Error::structure(StructureErrorKind::NonPrimitiveAttribute {
                name: name.clone(),
            }));
        };
        if scalar.is_null() {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attribute(&scalar.to_text(), out);
        out.push('"');
    }
    Ok(())
}

/// Minimal text escaping: only `&` and `<` are unsafe in character data
fn escape_text(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            ch => out.push(ch),
        }
    }
}

/// Attribute values additionally escape the double quote delimiter
fn escape_attribute(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            ch => out.push(ch),
        }
    }
}
