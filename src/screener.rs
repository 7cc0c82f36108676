use crate::{
    error::Result,
    scanner::Scanner,
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use std::{io::BufRead, iter::Filter};

type Significant<R> = Filter<Scanner<R>, fn(&Result<Token>) -> bool>;

/// The parser's view of the token stream: whitespace and comments removed,
/// with as much lookahead as the parser asks for.
pub struct Screener<R: BufRead> {
    tokens: PeekMoreIterator<Significant<R>>,
}

impl<R: BufRead> Screener<R> {
    pub fn new(scanner: Scanner<R>) -> Self {
        let significant: Significant<R> = scanner.filter(is_significant as fn(&Result<Token>) -> bool);
        Self { tokens: significant.peekmore() }
    }

    pub fn peek(&mut self) -> Option<&Result<Token>> {
        self.tokens.peek_nth(0)
    }

    /// Looks `n` significant tokens ahead without consuming anything.
    pub fn peek_nth(&mut self, n: usize) -> Option<&Result<Token>> {
        self.tokens.peek_nth(n)
    }

    pub fn peek_kind(&mut self, n: usize) -> Option<TokenKind> {
        match self.peek_nth(n) {
            Some(Ok(token)) => Some(token.kind()),
            _ => None,
        }
    }

    /// Consumes the next token if it is `kind` spelled `value`, as a parser
    /// does for `let`, `=`, `(` and friends.
    pub fn next_if_matches(&mut self, kind: TokenKind, value: &str) -> Option<Token> {
        let matches = matches!(self.peek(), Some(Ok(t)) if t.kind() == kind && t.value() == value);
        if !matches {
            return None;
        }
        match self.tokens.next() {
            Some(Ok(token)) => Some(token),
            _ => None,
        }
    }
}

impl<R: BufRead> Iterator for Screener<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        self.tokens.next()
    }
}

fn is_significant(item: &Result<Token>) -> bool {
    item.as_ref().map_or(true, |token| !token.is_discardable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn screen(src: &str) -> Screener<&[u8]> {
        Scanner::new(src.as_bytes()).screened()
    }

    #[test]
    fn drops_whitespace_and_comments() -> Result<()> {
        let values: Vec<String> = screen("let x // the x\n  = 1")
            .map(|t| t.map(|t| t.value().to_string()))
            .collect::<Result<_>>()?;
        assert_eq!(vec!["let", "x", "=", "1"], values);
        Ok(())
    }

    #[test]
    fn peeking_does_not_consume() {
        let mut tokens = screen("fn x . x");
        assert_eq!(Some(TokenKind::Reserved), tokens.peek_kind(0));
        assert_eq!(Some(TokenKind::Identifier), tokens.peek_kind(1));
        assert_eq!(Some(TokenKind::Operator), tokens.peek_kind(2));
        assert_eq!(None, tokens.peek_kind(4));

        let first = tokens.next().unwrap().unwrap();
        assert_eq!("fn", first.value());
        assert_eq!(Some(TokenKind::Identifier), tokens.peek_kind(0));
    }

    #[test]
    fn next_if_matches_checks_kind_and_text() {
        let mut tokens = screen("let x");
        assert!(tokens.next_if_matches(TokenKind::Reserved, "in").is_none());
        assert!(tokens.next_if_matches(TokenKind::Identifier, "let").is_none());
        let t = tokens.next_if_matches(TokenKind::Reserved, "let").unwrap();
        assert_eq!("let", t.value());
        assert_eq!(Some(TokenKind::Identifier), tokens.peek_kind(0));
    }

    #[test]
    fn errors_are_passed_through() {
        let mut tokens = screen("x 'oops");
        assert!(matches!(tokens.next(), Some(Ok(_))));
        match tokens.peek() {
            Some(Err(e)) => assert!(matches!(e.kind(), ErrorKind::UnterminatedString)),
            other => panic!("expected an error, got {:?}", other),
        }
        assert_eq!(None, tokens.peek_kind(0));
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert!(tokens.next().is_none());
    }

    #[test]
    fn only_discardable_input_is_empty() {
        assert!(screen("  // nothing\n\t").next().is_none());
    }
}
