//! Token types for the JSON lexer

use crate::error::Span;

/// JSON token kinds
///
/// Numbers keep the narrowest representation the source used: an integer
/// literal lexes to `Int`, anything with a fraction or exponent to `Float`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Structural
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Colon,        // :
    Comma,        // ,

    // Literals
    Null,
    True,
    False,

    // Values
    String(String),
    Int(i64),
    Float(f64),

    // Special
    Eof,
}

impl TokenKind {
    /// Token name for error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::String(_) => "string",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Eof => "EOF",
        }
    }

    /// True if the token can appear in value position
    pub const fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::True
                | Self::False
                | Self::String(_)
                | Self::Int(_)
                | Self::Float(_)
                | Self::LeftBrace
                | Self::LeftBracket
        )
    }
}

/// Token with source location
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
