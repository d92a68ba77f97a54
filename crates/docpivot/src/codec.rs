//! The codec boundary: every format implements the same two operations
//!
//! A codec owns no state; it reads bytes into a [`Content`] tree or renders
//! a tree into text. Callers combine two codecs to convert between formats
//! and never see format-specific types.

use crate::content::Content;
use crate::error::Result;
use crate::json;
use crate::xml;

/// A format's parse/render pair
pub trait Codec {
    /// Parse raw bytes into a content tree
    fn parse(&self, input: &[u8]) -> Result<Content>;

    /// Render a content tree as text for this format
    fn render(&self, content: &Content) -> Result<String>;
}

/// JSON codec
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn parse(&self, input: &[u8]) -> Result<Content> {
        json::Parser::new(input).parse_content()
    }

    fn render(&self, content: &Content) -> Result<String> {
        Ok(json::render(content))
    }
}

/// XML codec
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
    fn parse(&self, input: &[u8]) -> Result<Content> {
        let doc = xml::Parser::new(input).parse()?;
        Ok(xml::document_to_content(&doc))
    }

    fn render(&self, content: &Content) -> Result<String> {
        xml::render(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codecs_behind_the_trait() {
        let codecs: [&dyn Codec; 2] = [&JsonCodec, &XmlCodec];
        let inputs: [&[u8]; 2] = [br#"{"a":1}"#, b"<a>1</a>"];
        for (codec, input) in codecs.iter().zip(inputs) {
            let tree = codec.parse(input).unwrap();
            assert!(tree.is_object());
            let rendered = codec.render(&tree).unwrap();
            assert_eq!(rendered.as_bytes(), input);
        }
    }

    #[test]
    fn test_json_codec_parse_error_surfaces() {
        let err = JsonCodec.parse(br#"{"a":1"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_xml_codec_render_structure_error_surfaces() {
        let tree = JsonCodec.parse(br#"{"a":1}"#).unwrap();
        let err = XmlCodec.render(&tree).unwrap_err();
        assert!(err.is_structure());
    }
}
