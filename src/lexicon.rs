//! Character classes and reserved words of the RPAL lexicon.
//!
//! Every predicate here is a direct membership check against a fixed
//! character set. The scanner only ever asks these questions, so the set of
//! legal characters is defined in exactly one place.

use phf::phf_set;

/// Identifiers that are lexed as [`TokenKind::Reserved`](crate::token::TokenKind::Reserved).
pub static RESERVED_WORDS: phf::Set<&'static str> = phf_set! {
    "let", "in", "within", "fn", "where", "aug", "or", "not",
    "gr", "ge", "ls", "le", "eq", "ne", "true", "false",
    "nil", "dummy", "rec", "and",
};

/// What the first character of a token commits the scanner to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Category {
    Identifier,
    Integer,
    Operator,
    String,
    Whitespace,
    Punctuation(Punctuation),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Punctuation {
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
}

pub const STRING_QUOTE: char = '\'';
pub const ESCAPE: char = '\\';

pub fn is_reserved(text: &str) -> bool {
    RESERVED_WORDS.contains(text)
}

pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_identifier_continuation(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_'
}

pub fn is_operator_symbol(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '<' | '>' | '&' | '.' | '@' | '/' | ':' | '=' | '~' | '|'
            | '$' | '!' | '#' | '%' | '^' | '_' | '[' | ']' | '{' | '}' | '"' | '?'
    )
}

pub fn punctuation(c: char) -> Option<Punctuation> {
    match c {
        '(' => Some(Punctuation::LeftParen),
        ')' => Some(Punctuation::RightParen),
        ';' => Some(Punctuation::Semicolon),
        ',' => Some(Punctuation::Comma),
        _ => None,
    }
}

pub fn is_punctuation(c: char) -> bool {
    punctuation(c).is_some()
}

pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Characters allowed between the quotes of a string literal.
pub fn is_string_body(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | ESCAPE)
        || is_punctuation(c)
        || is_letter(c)
        || is_digit(c)
        || is_operator_symbol(c)
}

/// Characters allowed after `//` on a comment line.
pub fn is_comment_body(c: char) -> bool {
    c == STRING_QUOTE || c == '\r' || is_string_body(c)
}

/// Picks the token category a character starts. Returns `None` for
/// characters outside the lexicon.
pub fn classify(c: char) -> Option<Category> {
    if is_letter(c) {
        Some(Category::Identifier)
    } else if is_digit(c) {
        Some(Category::Integer)
    } else if is_operator_symbol(c) {
        Some(Category::Operator)
    } else if c == STRING_QUOTE {
        Some(Category::String)
    } else if is_space(c) {
        Some(Category::Whitespace)
    } else {
        punctuation(c).map(Category::Punctuation)
    }
}
