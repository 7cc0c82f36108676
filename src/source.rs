use std::io::{self, BufRead};

use crate::error::{Error, Result};

/// A character cursor over a UTF-8 reader with one character of pushback.
///
/// The reader is dropped as soon as it reports end of input, and otherwise
/// when the source itself is dropped.
pub struct CharSource<R> {
    reader: Option<R>,
    pending: Option<char>,
    line: usize,
}

impl<R: BufRead> CharSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            pending: None,
            line: 1,
        }
    }

    /// The line the next unread character sits on.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_char(&mut self) -> Result<Option<char>> {
        let next = match self.pending.take() {
            Some(c) => Some(c),
            None => self.read_char()?,
        };
        if next == Some('\n') {
            self.line += 1;
        }
        Ok(next)
    }

    /// Hands `c` back so the next call to `next_char` returns it again.
    pub fn push_back(&mut self, c: char) {
        debug_assert!(self.pending.is_none(), "only one character of pushback");
        if c == '\n' {
            self.line -= 1;
        }
        self.pending = Some(c);
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.pending.is_none() && self.reader.is_none()
    }

    fn read_char(&mut self) -> Result<Option<char>> {
        let line = self.line;
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };
        match decode_char(reader) {
            Ok(Some(c)) => Ok(Some(c)),
            Ok(None) => {
                tracing::debug!(line, "reached end of source");
                self.reader = None;
                Ok(None)
            },
            Err(e) => {
                self.reader = None;
                Err(Error::io(line, e, "Could not read source."))
            },
        }
    }
}

fn decode_char<R: BufRead>(reader: &mut R) -> io::Result<Option<char>> {
    let lead = match read_byte(reader)? {
        Some(b) => b,
        None => return Ok(None),
    };
    let width = utf8_width(lead).ok_or_else(|| invalid_utf8(format!("invalid leading byte {:#04x}", lead)))?;

    let mut bytes = [lead, 0, 0, 0];
    for slot in bytes.iter_mut().take(width).skip(1) {
        *slot = read_byte(reader)?.ok_or_else(|| invalid_utf8("truncated character at end of input"))?;
    }

    let decoded = std::str::from_utf8(&bytes[..width]).map_err(|e| invalid_utf8(e.to_string()))?;
    Ok(decoded.chars().next())
}

fn read_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        let byte = match reader.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if byte.is_some() {
            reader.consume(1);
        }
        return Ok(byte);
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8<S: Into<String>>(message: S) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn drain<R: BufRead>(src: &mut CharSource<R>) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = src.next_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn yields_characters_in_order() -> Result<()> {
        let mut src = CharSource::new("let x".as_bytes());
        assert_eq!("let x", drain(&mut src)?);
        assert_eq!(None, src.next_char()?);
        assert!(src.is_exhausted());
        Ok(())
    }

    #[test]
    fn pushed_back_character_comes_out_next() -> Result<()> {
        let mut src = CharSource::new("ab".as_bytes());
        assert_eq!(Some('a'), src.next_char()?);
        src.push_back('a');
        assert!(!src.is_exhausted());
        assert_eq!(Some('a'), src.next_char()?);
        assert_eq!(Some('b'), src.next_char()?);
        assert_eq!(None, src.next_char()?);
        Ok(())
    }

    #[test]
    fn pushback_survives_end_of_input() -> Result<()> {
        let mut src = CharSource::new("a".as_bytes());
        assert_eq!(Some('a'), src.next_char()?);
        assert_eq!(None, src.next_char()?);
        src.push_back('a');
        assert_eq!(Some('a'), src.next_char()?);
        assert_eq!(None, src.next_char()?);
        Ok(())
    }

    #[test]
    fn line_counts_newlines_consumed() -> Result<()> {
        let mut src = CharSource::new("a\nb\n".as_bytes());
        assert_eq!(1, src.line());
        src.next_char()?;
        assert_eq!(1, src.line());
        assert_eq!(Some('\n'), src.next_char()?);
        assert_eq!(2, src.line());
        src.push_back('\n');
        assert_eq!(1, src.line());
        src.next_char()?;
        src.next_char()?;
        src.next_char()?;
        assert_eq!(3, src.line());
        Ok(())
    }

    #[test]
    fn decodes_multibyte_characters() -> Result<()> {
        let mut src = CharSource::new("é€𝄞".as_bytes());
        assert_eq!("é€𝄞", drain(&mut src)?);
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = &[b'a', 0xFF];
        let mut src = CharSource::new(bytes);
        assert!(matches!(src.next_char(), Ok(Some('a'))));
        let err = src.next_char().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io(_)));
        assert_eq!(1, err.line());
    }

    #[test]
    fn truncated_character_is_an_io_error() {
        let bytes: &[u8] = &[0xE2, 0x82];
        let mut src = CharSource::new(bytes);
        assert!(src.next_char().unwrap_err().is_io_error());
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn reader_failure_is_not_end_of_input() {
        let mut src = CharSource::new(io::BufReader::new(FailingReader));
        let err = src.next_char().unwrap_err();
        assert!(err.is_io_error());
        assert!(src.is_exhausted());
        assert!(matches!(src.next_char(), Ok(None)));
    }
}
