//! Error types for docpivot
//!
//! Two failure classes cross the codec boundary: parse errors (malformed
//! source bytes for the declared format) and structure errors (a valid
//! content tree that violates a codec's structural convention during
//! rendering). Neither is retried; a conversion either completes or aborts.

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Malformed source bytes for the declared format
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidToken,
    UnexpectedEof,
    UnterminatedString,
    InvalidEscapeSequence,
    InvalidUnicodeEscape,
    InvalidNumber,
    InvalidUtf8,
    InvalidEntity,
    Expected { expected: String, found: String },
    MismatchedTag { open: String, close: String },
    DuplicateAttribute { name: String },
    TrailingContent,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "invalid token"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            Self::InvalidUnicodeEscape => write!(f, "invalid unicode escape"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::InvalidEntity => write!(f, "invalid entity reference"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::MismatchedTag { open, close } => {
                write!(f, "mismatched closing tag: expected </{open}>, found </{close}>")
            }
            Self::DuplicateAttribute { name } => {
                write!(f, "duplicate attribute: {name}")
            }
            Self::TrailingContent => write!(f, "trailing content after document"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// A syntactically valid content tree that violates a codec's structural
/// convention during rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// The root of an XML rendering is not wrapped by the declaration marker
    MissingDeclaration,
    /// The root of an XML rendering is not an object
    NonObjectRoot,
    /// An array element in XML element position is not an object
    NonObjectArrayElement { tag: String },
    /// The attribute bag under `#attributes` is not an object
    NonObjectAttributeBag,
    /// The text member under `#text` is not a primitive
    NonPrimitiveText { tag: String },
    /// An attribute bag entry is not a primitive
    NonPrimitiveAttribute { name: String },
}

impl fmt::Display for StructureErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDeclaration => {
                write!(f, "missing declaration/root wrapper")
            }
            Self::NonObjectRoot => write!(f, "xml root must be an object"),
            Self::NonObjectArrayElement { tag } => {
                write!(f, "array element under <{tag}> must be an object")
            }
            Self::NonObjectAttributeBag => {
                write!(f, "attribute bag must be an object")
            }
            Self::NonPrimitiveText { tag } => {
                write!(f, "text content of <{tag}> must be a primitive")
            }
            Self::NonPrimitiveAttribute { name } => {
                write!(f, "attribute {name} must hold a primitive value")
            }
        }
    }
}

/// Error category
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse(ParseErrorKind),
    Structure(StructureErrorKind),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(kind) => kind.fmt(f),
            Self::Structure(kind) => kind.fmt(f),
        }
    }
}

/// Main error type for docpivot
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Parse error at a specific source position
    pub fn parse_at(kind: ParseErrorKind, pos: Pos) -> Self {
        Self::new(ErrorKind::Parse(kind), Span::at(pos))
    }

    /// Structure error (no source position: the offending input is a tree)
    pub fn structure(kind: StructureErrorKind) -> Self {
        Self::new(ErrorKind::Structure(kind), Span::empty())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse(_))
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.kind, ErrorKind::Structure(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Parse(_) => {
                write!(f, "parse error at {}: {}", self.span.start, self.message)
            }
            ErrorKind::Structure(_) => write!(f, "structure error: {}", self.message),
        }
    }
}

/// Result type alias for docpivot
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "42:10:5");
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = Error::parse_at(ParseErrorKind::UnterminatedString, Pos::new(7, 2, 3));
        assert!(err.is_parse());
        assert!(!err.is_structure());
        assert_eq!(err.span().start, Pos::new(7, 2, 3));
        let display = err.to_string();
        assert!(display.contains("parse error at 7:2:3"));
        assert!(display.contains("unterminated string"));
    }

    #[test]
    fn test_structure_error_display() {
        let err = Error::structure(StructureErrorKind::MissingDeclaration);
        assert!(err.is_structure());
        assert!(err.to_string().contains("missing declaration/root wrapper"));
    }

    #[test]
    fn test_expected_error_display() {
        let kind = ParseErrorKind::Expected {
            expected: "':'".to_string(),
            found: "','".to_string(),
        };
        let err = Error::parse_at(kind, Pos::default());
        assert!(err.to_string().contains("expected ':', found ','"));
    }
}
