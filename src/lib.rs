//! A lexical scanner for RPAL.
//!
//! [`Scanner`] turns source text into [`Token`]s, including whitespace and
//! comments. [`Screener`] sits between the scanner and a parser and drops
//! those discardable tokens.

pub mod error;
pub mod lexicon;
pub mod scanner;
pub mod screener;
pub mod source;
pub mod token;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::scanner::Scanner;
pub use crate::screener::Screener;
pub use crate::token::{Token, TokenKind};
