//! Streaming JSON parser

use crate::content::{Array, Content, Object, Scalar};
use crate::error::{Error, ParseErrorKind, Pos, Result};
use crate::json::event::Event;
use crate::lexer::json::JsonLexer;
use crate::lexer::token::{Token, TokenKind};

/// Configuration for the JSON parser
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Container the parser is currently inside of
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContainerContext {
    Object,
    Array,
}

/// Event-driven JSON parser with depth and size limits
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: JsonLexer<'a>,
    config: Config,
    depth: u16,
    bytes_parsed: usize,
    context_stack: Vec<ContainerContext>,
    expecting_colon_after_key: bool,
    expecting_value: bool,
    expecting_key: bool,
    is_first_element: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            lexer: JsonLexer::new(input),
            config,
            depth: 0,
            bytes_parsed: 0,
            context_stack: Vec::new(),
            expecting_colon_after_key: false,
            expecting_value: false,
            expecting_key: false,
            is_first_element: true,
        }
    }

    /// Next event from the parser, or None at end of document
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        let token = self.lexer.next_token()?;

        let token_len = token
            .span
            .end
            .offset
            .saturating_sub(token.span.start.offset);
        self.bytes_parsed = self.bytes_parsed.saturating_add(token_len);

        if self.config.max_size > 0 && self.bytes_parsed > self.config.max_size {
            return Err(Error::parse_at(
                ParseErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                token.span.start,
            ));
        }

        if token.kind == TokenKind::Eof {
            if self.context_stack.is_empty() {
                return Ok(None);
            }
            return Err(Error::parse_at(
                ParseErrorKind::UnexpectedEof,
                token.span.start,
            ));
        }

        match self.context_stack.last().copied() {
            None => self.handle_root(token),
            Some(ContainerContext::Object) => self.handle_in_object(token),
            Some(ContainerContext::Array) => self.handle_in_array(token),
        }
    }

    /// Parse the complete input into a content tree
    pub fn parse_content(&mut self) -> Result<Content> {
        let content = self.parse_root()?;

        // the document must end where the root value does
        if self.next_event()?.is_some() {
            return Err(Error::parse_at(
                ParseErrorKind::TrailingContent,
                Pos::default(),
            ));
        }
        Ok(content)
    }

    fn parse_root(&mut self) -> Result<Content> {
        let mut object_stack: Vec<Object> = Vec::new();
        let mut array_stack: Vec<Array> = Vec::new();
        // key context restored when a nested container closes
        let mut key_stack: Vec<Option<String>> = Vec::new();
        let mut current_key: Option<String> = None;

        while let Some(event) = self.next_event()? {
            match event {
                Event::ObjectStart => {
                    key_stack.push(current_key.take());
                    object_stack.push(Object::new());
                }
                Event::ObjectEnd => {
                    let obj = object_stack
                        .pop()
                        .ok_or_else(|| self.error(ParseErrorKind::InvalidToken))?;
                    let obj_key = key_stack.pop().flatten();
                    match self.attach(
                        Content::Object(obj),
                        obj_key,
                        &mut object_stack,
                        &mut array_stack,
                    )? {
                        Some(root) => return Ok(root),
                        None => {}
                    }
                }
                Event::ArrayStart => {
                    key_stack.push(current_key.take());
                    array_stack.push(Array::new());
                }
                Event::ArrayEnd => {
                    let arr = array_stack
                        .pop()
                        .ok_or_else(|| self.error(ParseErrorKind::InvalidToken))?;
                    let arr_key = key_stack.pop().flatten();
                    match self.attach(
                        Content::Array(arr),
                        arr_key,
                        &mut object_stack,
                        &mut array_stack,
                    )? {
                        Some(root) => return Ok(root),
                        None => {}
                    }
                }
                Event::Key(key) => {
                    current_key = Some(key);
                }
                Event::Primitive(scalar) => {
                    let key = current_key.take();
                    match self.attach(
                        Content::Primitive(scalar),
                        key,
                        &mut object_stack,
                        &mut array_stack,
                    )? {
                        Some(root) => return Ok(root),
                        None => {}
                    }
                }
            }
        }

        Err(self.error(ParseErrorKind::UnexpectedEof))
    }

    /// Attach a completed value to its parent container, or return it as
    /// the document root when there is no parent.
    fn attach(
        &self,
        value: Content,
        key: Option<String>,
        object_stack: &mut [Object],
        array_stack: &mut [Array],
    ) -> Result<Option<Content>> {
        if let Some(key) = key {
            if let Some(parent) = object_stack.last_mut() {
                parent.insert(key, value);
                return Ok(None);
            }
            return Err(self.error(ParseErrorKind::InvalidToken));
        }
        if let Some(parent) = array_stack.last_mut() {
            parent.push(value);
            return Ok(None);
        }
        if !object_stack.is_empty() {
            // keyless value directly inside an object: malformed stream
            return Err(self.error(ParseErrorKind::InvalidToken));
        }
        Ok(Some(value))
    }

    fn handle_root(&mut self, token: Token) -> Result<Option<Event>> {
        match token.kind {
            TokenKind::LeftBrace => {
                self.increment_depth(token.span.start)?;
                self.context_stack.push(ContainerContext::Object);
                self.is_first_element = true;
                Ok(Some(Event::ObjectStart))
            }
            TokenKind::LeftBracket => {
                self.increment_depth(token.span.start)?;
                self.context_stack.push(ContainerContext::Array);
                self.is_first_element = true;
                Ok(Some(Event::ArrayStart))
            }
            TokenKind::Null => Ok(Some(Event::Primitive(Scalar::Null))),
            TokenKind::True => Ok(Some(Event::Primitive(Scalar::Bool(true)))),
            TokenKind::False => Ok(Some(Event::Primitive(Scalar::Bool(false)))),
            TokenKind::String(s) => Ok(Some(Event::Primitive(Scalar::Text(s)))),
            TokenKind::Int(n) => Ok(Some(Event::Primitive(Scalar::Int(n)))),
            TokenKind::Float(n) => Ok(Some(Event::Primitive(Scalar::Float(n)))),
            _ => Err(self.expected_error("value", &token)),
        }
    }

    fn handle_in_object(&mut self, token: Token) -> Result<Option<Event>> {
        if self.expecting_colon_after_key {
            return match token.kind {
                TokenKind::Colon => {
                    self.expecting_colon_after_key = false;
                    self.expecting_value = true;
                    self.next_event()
                }
                _ => Err(self.expected_error("':'", &token)),
            };
        }

        if self.expecting_value {
            self.expecting_value = false;
            self.is_first_element = false;
            return self.parse_value_token(token);
        }

        match token.kind {
            // '}' is not allowed right after a comma (trailing comma)
            TokenKind::RightBrace if !self.expecting_key => {
                self.pop_context();
                Ok(Some(Event::ObjectEnd))
            }
            TokenKind::String(s) if self.is_first_element || self.expecting_key => {
                self.is_first_element = false;
                self.expecting_key = false;
                self.expecting_colon_after_key = true;
                Ok(Some(Event::Key(s)))
            }
            TokenKind::Comma if !self.is_first_element && !self.expecting_key => {
                self.expecting_key = true;
                self.next_event()
            }
            _ => {
                if self.expecting_key {
                    Err(self.expected_error("string key", &token))
                } else if self.is_first_element {
                    Err(self.expected_error("string key or '}'", &token))
                } else {
                    Err(self.expected_error("',' or '}'", &token))
                }
            }
        }
    }

    fn handle_in_array(&mut self, token: Token) -> Result<Option<Event>> {
        match token.kind {
            // ']' is not allowed right after a comma (trailing comma)
            TokenKind::RightBracket if !self.expecting_value => {
                self.pop_context();
                Ok(Some(Event::ArrayEnd))
            }
            TokenKind::Comma if !self.is_first_element && !self.expecting_value => {
                self.expecting_value = true;
                self.next_event()
            }
            _ if self.is_first_element || self.expecting_value => {
                self.is_first_element = false;
                self.expecting_value = false;
                self.parse_value_token(token)
            }
            _ => Err(self.expected_error("',' or ']'", &token)),
        }
    }

    fn parse_value_token(&mut self, token: Token) -> Result<Option<Event>> {
        match token.kind {
            TokenKind::LeftBrace => {
                self.increment_depth(token.span.start)?;
                self.context_stack.push(ContainerContext::Object);
                self.is_first_element = true;
                self.expecting_colon_after_key = false;
                self.expecting_value = false;
                Ok(Some(Event::ObjectStart))
            }
            TokenKind::LeftBracket => {
                self.increment_depth(token.span.start)?;
                self.context_stack.push(ContainerContext::Array);
                self.is_first_element = true;
                self.expecting_colon_after_key = false;
                self.expecting_value = false;
                Ok(Some(Event::ArrayStart))
            }
            TokenKind::Null => Ok(Some(Event::Primitive(Scalar::Null))),
            TokenKind::True => Ok(Some(Event::Primitive(Scalar::Bool(true)))),
            TokenKind::False => Ok(Some(Event::Primitive(Scalar::Bool(false)))),
            TokenKind::String(s) => Ok(Some(Event::Primitive(Scalar::Text(s)))),
            TokenKind::Int(n) => Ok(Some(Event::Primitive(Scalar::Int(n)))),
            TokenKind::Float(n) => Ok(Some(Event::Primitive(Scalar::Float(n)))),
            _ => Err(self.expected_error("value", &token)),
        }
    }

    fn increment_depth(&mut self, pos: Pos) -> Result<()> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(Error::parse_at(
                ParseErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                pos,
            ));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }

    fn pop_context(&mut self) {
        self.context_stack.pop();
        self.depth = self.depth.saturating_sub(1);
        if !self.context_stack.is_empty() {
            self.is_first_element = false;
            self.expecting_colon_after_key = false;
            self.expecting_value = false;
            self.expecting_key = false;
        }
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        Error::parse_at(kind, Pos::new(self.bytes_parsed, 0, 0))
    }

    fn expected_error(&self, expected: &str, token: &Token) -> Error {
        Error::parse_at(
            ParseErrorKind::Expected {
                expected: expected.to_string(),
                found: token.kind.name().to_string(),
            },
            token.span.start,
        )
    }
}
