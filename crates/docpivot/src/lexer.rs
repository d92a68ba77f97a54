//! Lexical analysis building blocks

pub mod cursor;
pub mod json;
pub mod token;

pub use cursor::Cursor;
pub use json::JsonLexer;
pub use token::{Token, TokenKind};
