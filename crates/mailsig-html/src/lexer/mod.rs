//! HTML lexer for tokenizing editor markup.
//!
//! The lexer covers the subset of HTML syntax a rich-text editor produces
//! (tags, attributes, text, comments, doctypes and raw-text elements). It
//! never fails: malformed input is recovered the way a browser would and the
//! problem is recorded as a [`ParseError`] for the caller to inspect.

mod entity;
mod token;

pub use entity::{decode_attribute, escape_attribute};
pub use token::{Attribute, StartTag, Token};

use crate::error::ParseError;

/// Elements whose content is consumed verbatim up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// HTML lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    raw_text: Option<&'static str>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
            errors: Vec::new(),
        }
    }

    /// Returns the current byte position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if at end of input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the lexer, returning the recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Peeks at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peeks at the byte at offset from current position.
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Advances by one byte.
    fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Returns the remaining input.
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Reads the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(name) = self.raw_text.take() {
            return self.read_raw_text(name);
        }

        let Some(byte) = self.peek() else {
            return Token::Eof;
        };

        if byte != b'<' {
            return self.read_text(self.pos);
        }

        match self.peek_at(1) {
            Some(b'/') => self.read_end_tag(),
            Some(b'!') => self.read_markup_declaration(),
            Some(c) if c.is_ascii_alphabetic() => self.read_start_tag(),
            _ => {
                // A lone '<' is character data
                self.error("Unexpected '<' outside of a tag");
                let start = self.pos;
                self.advance();
                self.read_text(start)
            }
        }
    }

    /// Reads character data up to the next '<'.
    fn read_text(&mut self, start: usize) -> Token<'a> {
        let end = self
            .rest()
            .find('<')
            .map_or(self.input.len(), |i| self.pos + i);
        self.pos = end;
        Token::Text(&self.input[start..end])
    }

    /// Reads an opening tag with its attributes.
    fn read_start_tag(&mut self) -> Token<'a> {
        let tag_start = self.pos;
        self.advance(); // Skip <

        let name = self.take_while(is_name_char).to_ascii_lowercase();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    self.error_at(tag_start, "Unterminated start tag");
                    return Token::Eof;
                }
                Some(b'>') => {
                    self.advance();
                    break;
                }
                Some(b'/') => {
                    self.advance();
                    if self.peek() == Some(b'>') {
                        self.advance();
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let attr_start = self.pos;
                    let Some(attribute) = self.read_attribute() else {
                        self.error_at(tag_start, "Unterminated start tag");
                        return Token::Eof;
                    };
                    if attributes.iter().any(|a| a.name == attribute.name) {
                        self.error_at(
                            attr_start,
                            &format!("Duplicate attribute '{}'", attribute.name),
                        );
                    } else {
                        attributes.push(attribute);
                    }
                }
            }
        }

        self.raw_text = RAW_TEXT_ELEMENTS.iter().find(|t| **t == name).copied();

        Token::StartTag(StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    /// Reads one attribute. Returns `None` if input ends inside it.
    fn read_attribute(&mut self) -> Option<Attribute> {
        let start = self.pos;

        // A leading '=' belongs to the name
        if self.peek() == Some(b'=') {
            self.advance();
        }
        self.take_while(|b| !is_whitespace(b) && !matches!(b, b'/' | b'>' | b'='));
        let name = self.input[start..self.pos].to_ascii_lowercase();

        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Some(Attribute { name, value: None });
        }
        self.advance();
        self.skip_whitespace();

        let value = match self.peek()? {
            quote @ (b'"' | b'\'') => {
                self.advance();
                let len = self.rest().find(char::from(quote))?;
                let value = &self.rest()[..len];
                self.pos += len + 1;
                value
            }
            _ => self.take_while(|b| !is_whitespace(b) && b != b'>'),
        };

        Some(Attribute {
            name,
            value: Some(decode_attribute(value).into_owned()),
        })
    }

    /// Reads a closing tag. Attributes on end tags are skipped.
    fn read_end_tag(&mut self) -> Token<'a> {
        let tag_start = self.pos;
        self.pos += 2; // Skip </

        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                let name = self.take_while(is_name_char).to_ascii_lowercase();
                if let Some(i) = self.rest().find('>') {
                    self.pos += i + 1;
                    Token::EndTag(name)
                } else {
                    self.error_at(tag_start, "Unterminated end tag");
                    self.pos = self.input.len();
                    Token::Eof
                }
            }
            Some(b'>') => {
                self.advance();
                self.error_at(tag_start, "Empty end tag");
                self.next_token()
            }
            None => {
                self.error_at(tag_start, "Unterminated end tag");
                Token::Eof
            }
            Some(_) => {
                self.error_at(tag_start, "Invalid end tag");
                self.read_bogus_comment(tag_start + 2)
            }
        }
    }

    /// Reads `<!-- ... -->`, `<!doctype ...>` or a bogus comment.
    fn read_markup_declaration(&mut self) -> Token<'a> {
        let tag_start = self.pos;

        if self.rest().starts_with("<!--") {
            self.pos += 4;
            if let Some(i) = self.rest().find("-->") {
                let body = &self.rest()[..i];
                self.pos += i + 3;
                Token::Comment(body)
            } else {
                self.error_at(tag_start, "Unterminated comment");
                let body = self.rest();
                self.pos = self.input.len();
                Token::Comment(body)
            }
        } else if self
            .rest()
            .as_bytes()
            .get(..9)
            .is_some_and(|b| b.eq_ignore_ascii_case(b"<!doctype"))
        {
            self.pos += 9;
            if let Some(i) = self.rest().find('>') {
                let body = self.rest()[..i].trim();
                self.pos += i + 1;
                Token::Doctype(body)
            } else {
                self.error_at(tag_start, "Unterminated doctype");
                self.pos = self.input.len();
                Token::Eof
            }
        } else {
            self.error_at(tag_start, "Bogus comment");
            self.read_bogus_comment(tag_start + 2)
        }
    }

    /// Reads everything up to the next '>' as a comment.
    fn read_bogus_comment(&mut self, start: usize) -> Token<'a> {
        self.pos = start;
        let end = self
            .rest()
            .find('>')
            .map_or(self.input.len(), |i| self.pos + i);
        let body = &self.input[start..end];
        self.pos = (end + 1).min(self.input.len());
        Token::Comment(body)
    }

    /// Reads raw-text element content up to its closing tag.
    ///
    /// An unterminated element swallows the rest of the input; the tree
    /// builder reports it as unclosed.
    fn read_raw_text(&mut self, name: &'static str) -> Token<'a> {
        let rest = self.rest();
        let close = rest.match_indices("</").map(|(i, _)| i).find(|&i| {
            let after = &rest.as_bytes()[i + 2..];
            after
                .get(..name.len())
                .is_some_and(|n| n.eq_ignore_ascii_case(name.as_bytes()))
                && after
                    .get(name.len())
                    .is_none_or(|&b| is_whitespace(b) || b == b'/' || b == b'>')
        });

        let len = close.unwrap_or(rest.len());
        self.pos += len;
        Token::Text(&rest[..len])
    }

    /// Consumes bytes while the predicate holds.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Skips ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    /// Records an error at the current position.
    fn error(&mut self, message: &str) {
        self.error_at(self.pos, message);
    }

    /// Records an error at the given position.
    fn error_at(&mut self, position: usize, message: &str) {
        self.errors.push(ParseError {
            position,
            message: message.to_string(),
        });
    }
}

/// Returns true for HTML whitespace bytes.
#[must_use]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Returns true if the byte may appear in a tag name.
#[must_use]
pub const fn is_name_char(b: u8) -> bool {
    !is_whitespace(b) && b != b'/' && b != b'>'
}
