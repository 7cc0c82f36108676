use crate::{
    error::{Error, Result},
    lexicon::{self, Category, Punctuation, ESCAPE, STRING_QUOTE},
    screener::Screener,
    source::CharSource,
    token::{Token, TokenKind},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    iter::FusedIterator,
    mem,
    path::Path,
};

/// Pulls RPAL tokens out of a reader one at a time.
///
/// Whitespace and comments come out as ordinary tokens; see
/// [`Scanner::screened`] for a stream without them. After the first error
/// the scanner yields nothing more.
pub struct Scanner<R> {
    src: CharSource<R>,
    lexeme_buffer: String,
    finished: bool,
}

impl Scanner<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(1, e, format!("Could not open {}.", path.display())))?;
        tracing::debug!(path = %path.display(), "opened source");
        Ok(Scanner::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        self.next_token().transpose()
    }
}

impl<R: BufRead> FusedIterator for Scanner<R> {}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            src: CharSource::new(reader),
            lexeme_buffer: String::new(),
            finished: false,
        }
    }

    /// Returns the next token, or `None` once the input is used up.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.finished {
            return Ok(None);
        }

        let scanned = self.scan_token();
        match &scanned {
            Ok(Some(token)) => tracing::trace!(kind = %token.kind(), line = token.line(), "scanned token"),
            Ok(None) => {
                debug_assert!(self.src.is_exhausted());
                self.finished = true;
            },
            Err(e) => {
                tracing::warn!(line = e.line(), error = %e, "scanning stopped");
                self.finished = true;
            },
        }
        scanned
    }

    pub fn scan_tokens(self) -> Result<Vec<Token>> {
        self.collect()
    }

    /// Wraps the scanner in a [`Screener`], which drops whitespace and
    /// comments.
    pub fn screened(self) -> Screener<R> {
        Screener::new(self)
    }

    fn scan_token(&mut self) -> Result<Option<Token>> {
        let line = self.src.line();
        let first = match self.src.next_char()? {
            Some(c) => c,
            None => return Ok(None),
        };

        self.lexeme_buffer.clear();
        self.lexeme_buffer.push(first);

        let kind = match lexicon::classify(first) {
            Some(Category::Identifier) => self.extract_identifier()?,
            Some(Category::Integer) => self.extract_integer()?,
            Some(Category::Operator) => self.extract_operator(first)?,
            Some(Category::String) => self.extract_string(line)?,
            Some(Category::Whitespace) => self.extract_whitespace()?,
            Some(Category::Punctuation(p)) => punctuation_kind(p),
            None => return Err(Error::unexpected_character(line, first)),
        };

        let value = mem::take(&mut self.lexeme_buffer);
        Ok(Some(Token::new(kind, value, line)))
    }

    fn extract_identifier(&mut self) -> Result<TokenKind> {
        self.advance_while(lexicon::is_identifier_continuation)?;

        if lexicon::is_reserved(&self.lexeme_buffer) {
            Ok(TokenKind::Reserved)
        } else {
            Ok(TokenKind::Identifier)
        }
    }

    fn extract_integer(&mut self) -> Result<TokenKind> {
        self.advance_while(lexicon::is_digit)?;
        Ok(TokenKind::Integer)
    }

    fn extract_operator(&mut self, first: char) -> Result<TokenKind> {
        if first == '/' {
            match self.src.next_char()? {
                Some('/') => {
                    self.lexeme_buffer.push('/');
                    return self.extract_comment();
                },
                Some(c) => self.src.push_back(c),
                None => return Ok(TokenKind::Operator),
            }
        }

        self.advance_while(lexicon::is_operator_symbol)?;
        Ok(TokenKind::Operator)
    }

    // The newline that ends a comment is swallowed: it is in neither this
    // token nor the next one.
    fn extract_comment(&mut self) -> Result<TokenKind> {
        loop {
            match self.src.next_char()? {
                None | Some('\n') => return Ok(TokenKind::Comment),
                Some(c) if lexicon::is_comment_body(c) => self.lexeme_buffer.push(c),
                Some(c) => return Err(Error::unexpected_character(self.src.line(), c)),
            }
        }
    }

    fn extract_string(&mut self, start_line: usize) -> Result<TokenKind> {
        // the opening quote is not part of the value
        self.lexeme_buffer.clear();

        loop {
            match self.src.next_char()? {
                None => return Err(Error::unterminated_string(start_line)),
                Some(STRING_QUOTE) => return Ok(TokenKind::String),
                Some(ESCAPE) => {
                    self.lexeme_buffer.push(ESCAPE);
                    match self.src.next_char()? {
                        None => return Err(Error::unterminated_string(start_line)),
                        Some(c) if c == STRING_QUOTE || lexicon::is_string_body(c) => {
                            self.lexeme_buffer.push(c)
                        },
                        Some(c) => return Err(Error::unexpected_character(self.src.line(), c)),
                    }
                },
                Some(c) if lexicon::is_string_body(c) => self.lexeme_buffer.push(c),
                Some(c) => return Err(Error::unexpected_character(self.src.line(), c)),
            }
        }
    }

    fn extract_whitespace(&mut self) -> Result<TokenKind> {
        self.advance_while(lexicon::is_space)?;
        Ok(TokenKind::Whitespace)
    }

    fn advance_while(&mut self, accept: impl Fn(char) -> bool) -> Result<()> {
        while let Some(c) = self.src.next_char()? {
            if accept(c) {
                self.lexeme_buffer.push(c);
            } else {
                self.src.push_back(c);
                break;
            }
        }
        Ok(())
    }
}

fn punctuation_kind(p: Punctuation) -> TokenKind {
    match p {
        Punctuation::LeftParen => TokenKind::LeftParen,
        Punctuation::RightParen => TokenKind::RightParen,
        Punctuation::Semicolon => TokenKind::Semicolon,
        Punctuation::Comma => TokenKind::Comma,
    }
}
