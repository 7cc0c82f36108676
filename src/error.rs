use std::io;
use std::result;

use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A lexical failure. `line` is where the offending token started, or where
/// the reader gave out for I/O failures.
#[derive(Debug, ThisError)]
#[error("[line {line}] Error: {message}")]
pub struct Error {
    #[source]
    kind: ErrorKind,
    line: usize,
    message: String,
}

impl Error {
    pub fn unterminated_string(line: usize) -> Error {
        let kind = ErrorKind::UnterminatedString;
        Error { kind, line, message: "Unterminated string literal.".into() }
    }

    pub fn unexpected_character(line: usize, c: char) -> Error {
        let kind = ErrorKind::UnexpectedCharacter(c);
        Error { kind, line, message: format!("Unexpected character {:?}.", c) }
    }

    pub fn io<S: Into<String>>(line: usize, source: io::Error, message: S) -> Error {
        let kind = ErrorKind::Io(source);
        Error { kind, line, message: message.into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io(_))
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> io::Error {
        match e {
            Error { kind: ErrorKind::Io(inner), .. } => inner,
            e => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
