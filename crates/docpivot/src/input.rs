//! Conversion sources

use crate::convert::Format;

/// A borrowed conversion source. Carries the raw document bytes and,
/// optionally, the filename they were read from; the filename feeds
/// [`format_hint`](Input::format_hint) and error reporting, nothing else.
#[derive(Clone, Debug)]
pub struct Input<'a> {
    bytes: &'a [u8],
    filename: Option<&'a str>,
}

impl<'a> Input<'a> {
    pub const fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            filename: None,
        }
    }

    pub const fn from_str(text: &'a str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Attach the source filename
    pub const fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    pub const fn filename(&self) -> Option<&str> {
        self.filename
    }

    /// Format suggested by the filename extension, if one is attached
    pub fn format_hint(&self) -> Option<Format> {
        let (_, extension) = self.filename?.rsplit_once('.')?;
        Format::from_name(extension)
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Self::from_str(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::from_bytes(bytes)
    }
}
