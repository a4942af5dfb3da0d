//! Character sources.
//!
//! The lexer pulls one decoded character at a time from a [`RuneSource`].
//! Sources are single-pass: nothing here seeks or rewinds.

use std::io::{self, BufRead};
use std::str::Chars;
use std::sync::Arc;

use tracing::warn;

/// A decoded character together with its encoded width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rune {
    pub ch: char,
    pub width: usize,
}

impl Rune {
    pub fn new(ch: char, width: usize) -> Self {
        Self { ch, width }
    }
}

impl From<char> for Rune {
    fn from(ch: char) -> Self {
        Self::new(ch, ch.len_utf8())
    }
}

/// A failure of the character source other than clean end of input.
///
/// Cloneable so that a lookahead slot can keep reporting the same fault.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(Arc<io::Error>),

    /// A scripted source was read past the end of its script.
    #[error("cannot advance past the end of the sequence")]
    Exhausted,
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(Arc::new(err))
    }
}

/// A sequential, single-pass producer of decoded characters.
pub trait RuneSource {
    /// Reads the next character. `Ok(None)` signals clean end of input.
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError>;
}

impl<S: RuneSource + ?Sized> RuneSource for &mut S {
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError> {
        (**self).read_rune()
    }
}

impl<S: RuneSource + ?Sized> RuneSource for Box<S> {
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError> {
        (**self).read_rune()
    }
}

/// Reads characters out of a borrowed string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl RuneSource for StrSource<'_> {
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError> {
        Ok(self.chars.next().map(Rune::from))
    }
}

/// Decodes UTF-8 incrementally from a buffered byte reader.
///
/// Invalid or truncated sequences decode to U+FFFD; the reported width is
/// the number of bytes consumed for it, so offsets stay consistent with the
/// underlying byte stream.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    offset: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Number of bytes consumed from the reader so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ReadError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn consume_byte(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn replacement(&self, start: usize, width: usize) -> Rune {
        warn!(
            target: "unitconf::source",
            offset = start,
            width,
            "invalid UTF-8 sequence, substituting U+FFFD"
        );
        Rune::new(char::REPLACEMENT_CHARACTER, width)
    }
}

impl<R: BufRead> RuneSource for ReaderSource<R> {
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError> {
        let start = self.offset;
        let lead = match self.peek_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        self.consume_byte();

        let Some(len) = utf8_sequence_length(lead) else {
            return Ok(Some(self.replacement(start, 1)));
        };

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            match self.peek_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => {
                    *slot = byte;
                    self.consume_byte();
                }
                _ => {
                    let width = self.offset - start;
                    return Ok(Some(self.replacement(start, width)));
                }
            }
        }

        match std::str::from_utf8(&bytes[..len]) {
            Ok(s) => match s.chars().next() {
                Some(ch) => Ok(Some(Rune::new(ch, len))),
                None => Ok(Some(self.replacement(start, len))),
            },
            Err(_) => Ok(Some(self.replacement(start, len))),
        }
    }
}

fn utf8_sequence_length(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}
