//! Format selection and the conversion driver

use std::fmt;

use tracing::debug;

use crate::codec::{Codec, JsonCodec, XmlCodec};
use crate::content::Content;
use crate::error::Result;
use crate::input::Input;
use crate::json::{self, Config as JsonConfig};

/// Supported document formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub const ALL: [Self; 2] = [Self::Json, Self::Xml];

    /// Look up a format by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// The codec registered for this format
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Json => &JsonCodec,
            Self::Xml => &XmlCodec,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion options per format
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConvertOptions {
    pub json: JsonConfig,
}

/// Convert between supported formats.
///
/// A same-format conversion still goes through the content tree, so the
/// output is the canonical rendering rather than the input bytes.
pub fn convert(input: &Input<'_>, from: Format, to: Format) -> Result<String> {
    convert_with_options(input, from, to, &ConvertOptions::default())
}

/// Convert between supported formats with options
pub fn convert_with_options(
    input: &Input<'_>,
    from: Format,
    to: Format,
    options: &ConvertOptions,
) -> Result<String> {
    debug!(%from, %to, bytes = input.len(), "converting document");
    let tree = parse_with_options(input.as_bytes(), from, options)?;
    to.codec().render(&tree)
}

fn parse_with_options(input: &[u8], from: Format, options: &ConvertOptions) -> Result<Content> {
    match from {
        Format::Json => json::Parser::with_config(input, options.json).parse_content(),
        Format::Xml => from.codec().parse(input),
    }
}
