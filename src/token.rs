use std::fmt::{self, Display};

use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Token {
    kind: TokenKind,
    value: String,
    line: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Identifier, Reserved, Integer, String, Operator,

    Whitespace, Comment,

    LeftParen, RightParen, Semicolon, Comma,
}

impl Token {
    pub(crate) fn new<S: Into<String>>(kind: TokenKind, value: S, line: usize) -> Token {
        Token { kind, value: value.into(), line }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw text of the token. String literals exclude their quotes and
    /// keep escape sequences exactly as written.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_discardable(&self) -> bool {
        self.kind.is_discardable()
    }

    /// The token as it was spelled in the source.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::String => format!("'{}'", self.value),
            _ => self.value.clone(),
        }
    }
}

impl TokenKind {
    pub fn is_discardable(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Identifier => "ID",
            Reserved => "RESERVED",
            Integer => "INT",
            String => "STR",
            Operator => "OPERATOR",
            Whitespace => "WHITESPACE",
            Comment => "COMMENT",
            LeftParen => "(",
            RightParen => ")",
            Semicolon => ";",
            Comma => ",",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self.kind {
            LeftParen | RightParen | Semicolon | Comma => write!(f, "{}", self.kind),
            String => write!(f, "<{}:'{}'>", self.kind, self.value),
            _ => write!(f, "<{}:{}>", self.kind, self.value),
        }
    }
}
