//! JSON lexer (RFC 8259, no extensions)

use crate::error::{Error, ParseErrorKind, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// Tokenizes JSON input bytes
#[derive(Clone, Debug)]
pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonLexer<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.cursor.skip_whitespace();

        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => TokenKind::Eof,
            Some(b) => match b {
                b'{' => {
                    self.cursor.advance();
                    TokenKind::LeftBrace
                }
                b'}' => {
                    self.cursor.advance();
                    TokenKind::RightBrace
                }
                b'[' => {
                    self.cursor.advance();
                    TokenKind::LeftBracket
                }
                b']' => {
                    self.cursor.advance();
                    TokenKind::RightBracket
                }
                b':' => {
                    self.cursor.advance();
                    TokenKind::Colon
                }
                b',' => {
                    self.cursor.advance();
                    TokenKind::Comma
                }
                b'"' => self.lex_string()?,
                b'n' => self.lex_keyword(b"null", TokenKind::Null)?,
                b't' => self.lex_keyword(b"true", TokenKind::True)?,
                b'f' => self.lex_keyword(b"false", TokenKind::False)?,
                b'-' | b'0'..=b'9' => self.lex_number()?,
                _ => return Err(self.error_here(ParseErrorKind::InvalidToken)),
            },
        };

        let end = self.cursor.position();
        Ok(Token::new(kind, Span::new(start, end)))
    }

    /// Lex a string literal, decoding escapes
    fn lex_string(&mut self) -> Result<TokenKind> {
        // opening quote
        self.cursor.advance();

        let mut bytes: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4];

        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ParseErrorKind::UnterminatedString)),
                Some(b'"') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'\\') => {
                    self.cursor.advance();
                    let Some(escape) = self.cursor.current() else {
                        return Err(self.error_here(ParseErrorKind::InvalidEscapeSequence));
                    };
                    match escape {
                        b'"' => bytes.push(b'"'),
                        b'\\' => bytes.push(b'\\'),
                        b'/' => bytes.push(b'/'),
                        b'b' => bytes.push(0x08),
                        b'f' => bytes.push(0x0C),
                        b'n' => bytes.push(b'\n'),
                        b'r' => bytes.push(b'\r'),
                        b't' => bytes.push(b'\t'),
                        b'u' => {
                            self.cursor.advance();
                            let ch = self.lex_unicode_escape()?;
                            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                            continue;
                        }
                        _ => return Err(self.error_here(ParseErrorKind::InvalidEscapeSequence)),
                    }
                    self.cursor.advance();
                }
                Some(b) => {
                    // control characters must be escaped
                    if b < 0x20 {
                        return Err(self.error_here(ParseErrorKind::InvalidToken));
                    }
                    bytes.push(b);
                    self.cursor.advance();
                }
            }
        }

        let text = String::from_utf8(bytes)
            .map_err(|_| self.error_here(ParseErrorKind::InvalidUtf8))?;
        Ok(TokenKind::String(text))
    }

    /// Lex a `\uXXXX` escape, combining surrogate pairs
    fn lex_unicode_escape(&mut self) -> Result<char> {
        let start = self.cursor.position();
        let high = self.lex_hex4()?;

        let code = match high {
            0xD800..=0xDBFF => {
                // high surrogate: a low surrogate escape must follow
                if self.cursor.peek_bytes(2) != Some(b"\\u") {
                    return Err(Error::parse_at(ParseErrorKind::InvalidUnicodeEscape, start));
                }
                self.cursor.advance_by(2);
                let low = self.lex_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(Error::parse_at(ParseErrorKind::InvalidUnicodeEscape, start));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(Error::parse_at(ParseErrorKind::InvalidUnicodeEscape, start));
            }
            code => code,
        };

        char::from_u32(code)
            .ok_or_else(|| Error::parse_at(ParseErrorKind::InvalidUnicodeEscape, start))
    }

    fn lex_hex4(&mut self) -> Result<u32> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = match self.cursor.current() {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a') + 10,
                Some(b @ b'A'..=b'F') => u32::from(b - b'A') + 10,
                _ => return Err(self.error_here(ParseErrorKind::InvalidUnicodeEscape)),
            };
            code = code * 16 + digit;
            self.cursor.advance();
        }
        Ok(code)
    }

    fn lex_keyword(&mut self, keyword: &[u8], kind: TokenKind) -> Result<TokenKind> {
        if self.cursor.peek_bytes(keyword.len()) == Some(keyword) {
            self.cursor.advance_by(keyword.len());
            Ok(kind)
        } else {
            Err(self.error_here(ParseErrorKind::InvalidToken))
        }
    }

    /// Lex a number literal, keeping the narrowest representation
    fn lex_number(&mut self) -> Result<TokenKind> {
        let start = self.cursor.pos();
        let mut is_float = false;

        if self.cursor.current() == Some(b'-') {
            self.cursor.advance();
        }

        // integer part: a leading zero may not be followed by digits
        match self.cursor.current() {
            Some(b'0') => {
                self.cursor.advance();
            }
            Some(b'1'..=b'9') => {
                self.cursor.advance();
                while let Some(b'0'..=b'9') = self.cursor.current() {
                    self.cursor.advance();
                }
            }
            _ => return Err(self.error_here(ParseErrorKind::InvalidNumber)),
        }

        if self.cursor.current() == Some(b'.') {
            is_float = true;
            self.cursor.advance();
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ParseErrorKind::InvalidNumber));
            }
            while let Some(b'0'..=b'9') = self.cursor.current() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current(), Some(b'e') | Some(b'E')) {
            is_float = true;
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+') | Some(b'-')) {
                self.cursor.advance();
            }
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ParseErrorKind::InvalidNumber));
            }
            while let Some(b'0'..=b'9') = self.cursor.current() {
                self.cursor.advance();
            }
        }

        let raw = std::str::from_utf8(self.cursor.slice_from(start))
            .map_err(|_| self.error_here(ParseErrorKind::InvalidNumber))?;

        if !is_float {
            // integer literal; out-of-range values fall back to float
            if let Ok(n) = raw.parse::<i64>() {
                return Ok(TokenKind::Int(n));
            }
        }

        let n = raw
            .parse::<f64>()
            .map_err(|_| self.error_here(ParseErrorKind::InvalidNumber))?;
        Ok(TokenKind::Float(n))
    }

    fn error_here(&self, kind: ParseErrorKind) -> Error {
        Error::parse_at(kind, self.cursor.position())
    }
}

impl Iterator for JsonLexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => {
                if token.kind == TokenKind::Eof {
                    None
                } else {
                    Some(Ok(token))
                }
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &[u8]) -> Result<Vec<TokenKind>> {
        JsonLexer::new(input).map(|t| t.map(|t| t.kind)).collect()
    }

    #[test]
    fn test_structural_tokens() -> Result<()> {
        assert_eq!(
            kinds(b"{ } [ ] : ,")?,
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Colon,
                TokenKind::Comma,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_literals() -> Result<()> {
        assert_eq!(
            kinds(b"null true false")?,
            vec![TokenKind::Null, TokenKind::True, TokenKind::False]
        );
        Ok(())
    }

    #[test]
    fn test_string_escapes() -> Result<()> {
        assert_eq!(
            kinds(br#""hello\nworld\t!\"\\\/\b\f""#)?,
            vec![TokenKind::String("hello\nworld\t!\"\\/\x08\x0C".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_string_unicode_escape() -> Result<()> {
        assert_eq!(
            kinds(br#""\u0041\u00e9""#)?,
            vec![TokenKind::String("A\u{e9}".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_string_surrogate_pair() -> Result<()> {
        assert_eq!(
            kinds(br#""\ud83d\ude00""#)?,
            vec![TokenKind::String("\u{1F600}".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_string_lone_surrogate_rejected() {
        let result = kinds(br#""\ud83d""#);
        assert!(matches!(
            result,
            Err(e) if *e.kind() == ErrorKind::Parse(ParseErrorKind::InvalidUnicodeEscape)
        ));
    }

    #[test]
    fn test_string_raw_utf8_passthrough() -> Result<()> {
        let input = "\"caf\u{e9}\"".as_bytes();
        assert_eq!(
            kinds(input)?,
            vec![TokenKind::String("caf\u{e9}".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_integer_literals_lex_to_int() -> Result<()> {
        assert_eq!(
            kinds(b"123 -456 0")?,
            vec![TokenKind::Int(123), TokenKind::Int(-456), TokenKind::Int(0)]
        );
        Ok(())
    }

    #[test]
    fn test_fraction_and_exponent_lex_to_float() -> Result<()> {
        assert_eq!(
            kinds(b"3.5 -0.5 1e10 2E-3")?,
            vec![
                TokenKind::Float(3.5),
                TokenKind::Float(-0.5),
                TokenKind::Float(1e10),
                TokenKind::Float(2e-3),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() -> Result<()> {
        let big = b"999999999999999999999";
        assert!(matches!(kinds(big)?.as_slice(), [TokenKind::Float(_)]));
        Ok(())
    }

    #[test]
    fn test_unterminated_string() {
        let result = kinds(br#""hello"#);
        assert!(matches!(
            result,
            Err(e) if *e.kind() == ErrorKind::Parse(ParseErrorKind::UnterminatedString)
        ));
    }

    #[test]
    fn test_invalid_escape() {
        let result = kinds(br#""oops\x""#);
        assert!(matches!(
            result,
            Err(e) if *e.kind() == ErrorKind::Parse(ParseErrorKind::InvalidEscapeSequence)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let result = kinds(b"@");
        assert!(matches!(
            result,
            Err(e) if *e.kind() == ErrorKind::Parse(ParseErrorKind::InvalidToken)
        ));
    }

    #[test]
    fn test_control_character_in_string_rejected() {
        let result = kinds(b"\"a\x01b\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_position() {
        let mut lexer = JsonLexer::new(b"  \n @");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.span().start.line, 2);
        assert_eq!(err.span().start.col, 2);
    }
}
