//! A small S-expression parser for KiCad file formats.
//!
//! Unquoted atoms are kept verbatim, so numbers such as `1.27` or `-0.254` are written back
//! exactly as they were read. Quoted strings are unescaped on read and escaped on write.

pub mod formatter;

use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexpr {
    /// An unquoted atom, e.g. `symbol`, `yes`, `1.27`
    Atom(String),
    /// A quoted string, stored unescaped
    String(String),
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn atom(value: impl Into<String>) -> Self {
        Self::Atom(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn list(items: Vec<Sexpr>) -> Self {
        Self::List(items)
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(value) => Some(value),
            _ => None,
        }
    }

    /// The text of an atom or a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Atom(value) | Self::String(value) => Some(value),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The leading atom of a list, e.g. `property` for `(property "Value" "1k")`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    /// Find the first direct child list with the given tag.
    pub fn find_list(&self, tag: &str) -> Option<&Sexpr> {
        self.as_list()?.iter().find(|item| item.is_tagged(tag))
    }

    /// Find all direct child lists with the given tag.
    pub fn find_all_lists<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Sexpr> + 'a {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .filter(move |item| item.is_tagged(tag))
    }
}

/// Create a `(key value)` list.
pub fn kv(key: impl Into<String>, value: Sexpr) -> Sexpr {
    Sexpr::List(vec![Sexpr::atom(key), value])
}

impl Display for Sexpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sexpr::Atom(value) => f.write_str(value),
            Sexpr::String(value) => write!(f, "\"{}\"", escape(value)),
            Sexpr::List(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Source location, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected character. found: '{found}', {location}")]
    UnexpectedChar { found: char, location: Location },
    #[error("Unclosed list. opened at {location}")]
    UnclosedList { location: Location },
    #[error("Unterminated string. started at {location}")]
    UnterminatedString { location: Location },
    #[error("Trailing content after expression. {location}")]
    TrailingContent { location: Location },
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn location(&self) -> Location {
        Location { line: self.line, column: self.column }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn advance(&mut self) -> Option<char> {
        let (offset, ch) = self.chars.next()?;
        self.offset = offset + ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                // comment, up to end of line
                while let Some(ch) = self.advance() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => self.parse_list(),
            Some('"') => self.parse_string(),
            Some(')') => Err(ParseError::UnexpectedChar { found: ')', location: self.location() }),
            Some(_) => Ok(self.parse_atom()),
        }
    }

    fn parse_list(&mut self) -> Result<Sexpr, ParseError> {
        let location = self.location();
        self.advance();

        let mut items = vec![];
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnclosedList { location }),
                Some(')') => {
                    self.advance();
                    break;
                },
                Some(_) => items.push(self.parse_expr()?),
            }
        }

        Ok(Sexpr::List(items))
    }

    fn parse_atom(&mut self) -> Sexpr {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            self.advance();
        }

        Sexpr::Atom(self.input[start..self.offset].to_string())
    }

    fn parse_string(&mut self) -> Result<Sexpr, ParseError> {
        let location = self.location();
        self.advance();

        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::UnterminatedString { location }),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    None => return Err(ParseError::UnterminatedString { location }),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                },
                Some(ch) => value.push(ch),
            }
        }

        Ok(Sexpr::String(value))
    }
}

/// Parse a single S-expression; only whitespace and comments may follow it.
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    trace!("Parsing S-expression. bytes: {}", input.len());

    let mut parser = Parser::new(input);
    let expr = parser.parse_expr()?;

    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(ParseError::TrailingContent { location: parser.location() });
    }

    Ok(expr)
}
