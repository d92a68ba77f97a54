//! XML parsing
//!
//! Hand-written recursive descent over raw bytes. The parser produces the
//! node tree in [`crate::xml::model`]; mapping that tree onto content is the
//! job of [`crate::xml::tree`]. Namespaces, DOCTYPE validation and external
//! entities are out of scope: a DOCTYPE is skipped, only the five predefined
//! entities plus numeric character references are decoded.

use indexmap::IndexMap;

use super::model::{Declaration, Document, Element, Node};
use crate::error::{Error, ParseErrorKind, Result};
use crate::lexer::cursor::Cursor;

/// XML parser producing a [`Document`]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse a complete document: optional declaration, leading misc,
    /// exactly one root element, trailing misc
    pub fn parse(&mut self) -> Result<Document> {
        self.cursor.skip_whitespace();
        let declaration = self.parse_declaration()?;
        self.skip_misc()?;

        if self.cursor.current() != Some(b'<') {
            return Err(self.error_here(ParseErrorKind::Expected {
                expected: "'<'".to_string(),
                found: self.found_description(),
            }));
        }
        let root = self.parse_element()?;

        self.skip_misc()?;
        if !self.cursor.is_eof() {
            return Err(self.error_here(ParseErrorKind::TrailingContent));
        }

        Ok(Document { declaration, root })
    }

    /// `<?xml ...?>` if present; any other `<?...?>` is a processing
    /// instruction and is left for `skip_misc`
    fn parse_declaration(&mut self) -> Result<Option<Declaration>> {
        if self.cursor.peek_bytes(5) != Some(b"<?xml") {
            return Ok(None);
        }
        // "<?xml-stylesheet" is a PI, not a declaration
        match self.cursor.peek(5) {
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'?') => {}
            _ => return Ok(None),
        }
        self.cursor.advance_by(5);

        let mut attributes = IndexMap::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'?') => {
                    self.cursor.advance();
                    self.expect(b'>')?;
                    break;
                }
                Some(_) => {
                    let (name, value) = self.parse_attribute()?;
                    if attributes.insert(name.clone(), value).is_some() {
                        return Err(self.error_here(ParseErrorKind::DuplicateAttribute { name }));
                    }
                }
                None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
            }
        }

        Ok(Some(Declaration { attributes }))
    }

    /// Skip whitespace, comments, processing instructions and a DOCTYPE
    /// outside the root element
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.peek_bytes(4) == Some(b"<!--") {
                self.parse_comment_body()?;
            } else if self.cursor.peek_bytes(2) == Some(b"<?") {
                self.skip_processing_instruction()?;
            } else if self.cursor.peek_bytes(2) == Some(b"<!") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Parse an element starting at `<`
    fn parse_element(&mut self) -> Result<Element> {
        self.expect(b'<')?;
        let name = self.parse_name()?;

        let mut attributes = IndexMap::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'>') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'/') => {
                    // self-closing tag: no children
                    self.cursor.advance();
                    self.expect(b'>')?;
                    return Ok(Element {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                }
                Some(_) => {
                    let (attr_name, value) = self.parse_attribute()?;
                    if attributes.insert(attr_name.clone(), value).is_some() {
                        return Err(
                            self.error_here(ParseErrorKind::DuplicateAttribute { name: attr_name })
                        );
                    }
                }
                None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
            }
        }

        let children = self.parse_children(&name)?;
        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    /// Parse child nodes up to and including the matching closing tag
    fn parse_children(&mut self, open: &str) -> Result<Vec<Node>> {
        let mut children = Vec::new();
        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
                Some(b'<') => match self.cursor.peek(1) {
                    Some(b'/') => {
                        self.cursor.advance_by(2);
                        let close = self.parse_name()?;
                        self.cursor.skip_whitespace();
                        self.expect(b'>')?;
                        if close != open {
                            return Err(self.error_here(ParseErrorKind::MismatchedTag {
                                open: open.to_string(),
                                close,
                            }));
                        }
                        return Ok(children);
                    }
                    Some(b'!') => {
                        if self.cursor.peek_bytes(4) == Some(b"<!--") {
                            children.push(Node::Comment(self.parse_comment_body()?));
                        } else if self.cursor.peek_bytes(9) == Some(b"<![CDATA[") {
                            children.push(Node::CData(self.parse_cdata_body()?));
                        } else {
                            self.skip_doctype()?;
                        }
                    }
                    Some(b'?') => self.skip_processing_instruction()?,
                    _ => children.push(Node::Element(self.parse_element()?)),
                },
                Some(_) => {
                    if let Some(text) = self.parse_text()? {
                        children.push(Node::Text(text));
                    }
                }
            }
        }
    }

    /// Character data up to the next `<`; whitespace-only runs are dropped
    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }
        let raw = self.bytes_to_str(self.cursor.slice_from(start))?;
        if raw.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
            return Ok(None);
        }
        Ok(Some(self.decode_entities(raw)?))
    }

    fn parse_attribute(&mut self) -> Result<(String, String)> {
        let name = self.parse_name()?;
        self.cursor.skip_whitespace();
        self.expect(b'=')?;
        self.cursor.skip_whitespace();
        let value = self.parse_attribute_value()?;
        Ok((name, value))
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            Some(_) => {
                return Err(self.error_here(ParseErrorKind::Expected {
                    expected: "quote".to_string(),
                    found: self.found_description(),
                }))
            }
            None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        loop {
            match self.cursor.current() {
                Some(b) if b == quote => break,
                Some(b'<') => return Err(self.error_here(ParseErrorKind::InvalidToken)),
                Some(_) => self.cursor.advance(),
                None => return Err(self.error_here(ParseErrorKind::UnterminatedString)),
            }
        }
        let raw = self.bytes_to_str(self.cursor.slice_from(start))?;
        let value = self.decode_entities(raw)?;
        self.cursor.advance();
        Ok(value)
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            Some(_) => {
                return Err(self.error_here(ParseErrorKind::Expected {
                    expected: "name".to_string(),
                    found: self.found_description(),
                }))
            }
            None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
        }
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(self.bytes_to_str(self.cursor.slice_from(start))?.to_string())
    }

    /// `<!--` up to `-->`, returning the comment text
    fn parse_comment_body(&mut self) -> Result<String> {
        self.cursor.advance_by(4);
        let start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here(ParseErrorKind::UnexpectedEof));
            }
            if self.cursor.peek_bytes(3) == Some(b"-->") {
                let text = self.bytes_to_str(self.cursor.slice_from(start))?.to_string();
                self.cursor.advance_by(3);
                return Ok(text);
            }
            self.cursor.advance();
        }
    }

    /// `<![CDATA[` up to `]]>`, returning the raw section text
    fn parse_cdata_body(&mut self) -> Result<String> {
        self.cursor.advance_by(9);
        let start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here(ParseErrorKind::UnexpectedEof));
            }
            if self.cursor.peek_bytes(3) == Some(b"]]>") {
                let text = self.bytes_to_str(self.cursor.slice_from(start))?.to_string();
                self.cursor.advance_by(3);
                return Ok(text);
            }
            self.cursor.advance();
        }
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here(ParseErrorKind::UnexpectedEof));
            }
            if self.cursor.peek_bytes(2) == Some(b"?>") {
                self.cursor.advance_by(2);
                return Ok(());
            }
            self.cursor.advance();
        }
    }

    /// Skip `<!DOCTYPE ...>` including a bracketed internal subset
    fn skip_doctype(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        let mut bracket_depth = 0usize;
        loop {
            match self.cursor.current() {
                Some(b'[') => {
                    bracket_depth += 1;
                    self.cursor.advance();
                }
                Some(b']') => {
                    bracket_depth = bracket_depth.saturating_sub(1);
                    self.cursor.advance();
                }
                Some(b'>') if bracket_depth == 0 => {
                    self.cursor.advance();
                    return Ok(());
                }
                Some(_) => self.cursor.advance(),
                None => return Err(self.error_here(ParseErrorKind::UnexpectedEof)),
            }
        }
    }

    /// Decode the predefined entities and numeric character references
    fn decode_entities(&self, raw: &str) -> Result<String> {
        if !raw.contains('&') {
            return Ok(raw.to_string());
        }
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let entity = &rest[amp..];
            let Some(semi) = entity.find(';') else {
                return Err(self.error_here(ParseErrorKind::InvalidEntity));
            };
            let body = &entity[1..semi];
            match body {
                "amp" => out.push('&'),
                "lt" => out.push('<'),
                "gt" => out.push('>'),
                "quot" => out.push('"'),
                "apos" => out.push('\''),
                _ => out.push(self.decode_numeric_entity(body)?),
            }
            rest = &entity[semi + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn decode_numeric_entity(&self, body: &str) -> Result<char> {
        let code = body
            .strip_prefix("#x")
            .or_else(|| body.strip_prefix("#X"))
            .map(|hex| u32::from_str_radix(hex, 16))
            .or_else(|| body.strip_prefix('#').map(str::parse))
            .transpose()
            .map_err(|_| self.error_here(ParseErrorKind::InvalidEntity))?;
        code.and_then(char::from_u32)
            .ok_or_else(|| self.error_here(ParseErrorKind::InvalidEntity))
    }

    fn bytes_to_str(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.error_here(ParseErrorKind::InvalidUtf8))
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.cursor.consume(byte) {
            Ok(())
        } else {
            Err(self.error_here(ParseErrorKind::Expected {
                expected: format!("'{}'", char::from(byte)),
                found: self.found_description(),
            }))
        }
    }

    fn found_description(&self) -> String {
        match self.cursor.current() {
            Some(b) if b.is_ascii_graphic() => format!("'{}'", char::from(b)),
            Some(b) => format!("byte 0x{b:02x}"),
            None => "end of input".to_string(),
        }
    }

    fn error_here(&self, kind: ParseErrorKind) -> Error {
        Error::parse_at(kind, self.cursor.position())
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || matches!(b, b'-' | b'.' | b':')
}
