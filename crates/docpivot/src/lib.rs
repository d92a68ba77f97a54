//! docpivot - JSON/XML document converter through a shared content tree
//!
//! Every conversion goes through one format-agnostic [`Content`] tree:
//! parse the source format into a tree, render the tree in the target
//! format. The codecs are fully independent; neither knows the other
//! exists.
//!
//! # Quick Start
//!
//! ```
//! use docpivot::{convert, Format, Input};
//! # fn main() -> Result<(), docpivot::Error> {
//! let xml = convert(
//!     &Input::from_str(r##"{"#declaration":{"greeting":{"#text":"hi"}}}"##),
//!     Format::Json,
//!     Format::Xml,
//! )?;
//! assert_eq!(xml, "<greeting>hi</greeting>");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, ParseErrorKind, Pos, Result, Span, StructureErrorKind};

pub mod content;
pub use content::{semantic_eq, Array, Content, Object, Scalar};

pub mod reserved;

pub mod input;
pub use input::Input;

pub mod lexer;
pub use lexer::{Token, TokenKind};

pub mod codec;
pub use codec::{Codec, JsonCodec, XmlCodec};

pub mod convert;
pub use convert::{convert, convert_with_options, ConvertOptions, Format};

pub mod json;
pub mod xml;
pub use json::{Config as JsonConfig, Event, Parser as JsonParser};
pub use xml::{Document as XmlDocument, Parser as XmlParser};

/// Parse JSON from a string
pub fn from_json_str(s: &str) -> Result<Content> {
    JsonParser::new(s.as_bytes()).parse_content()
}

/// Parse JSON from bytes
pub fn from_json_bytes(bytes: &[u8]) -> Result<Content> {
    JsonParser::new(bytes).parse_content()
}

/// Parse JSON with a custom configuration
pub fn from_json_str_with_config(s: &str, config: JsonConfig) -> Result<Content> {
    JsonParser::with_config(s.as_bytes(), config).parse_content()
}

/// Parse XML from a string
pub fn from_xml_str(s: &str) -> Result<Content> {
    from_xml_bytes(s.as_bytes())
}

/// Parse XML from bytes
pub fn from_xml_bytes(bytes: &[u8]) -> Result<Content> {
    let doc = XmlParser::new(bytes).parse()?;
    Ok(xml::document_to_content(&doc))
}

/// Render a content tree as JSON text
pub fn to_json_string(content: &Content) -> String {
    json::render(content)
}

/// Render a content tree as XML text
pub fn to_xml_string(content: &Content) -> Result<String> {
    xml::render(content)
}
