use std::mem;

use unitconf_common::{Position, ReadError, Rune, RuneSource};

use crate::token::{Token, TokenKind};

/// The single-slot lookahead over the character source.
///
/// A character is decoded once by [`Cursor::peek`] and kept here until
/// [`Cursor::accept`] consumes it. End of input and faults stay in the slot
/// for good: the source is never read again after either.
#[derive(Debug)]
enum Lookahead {
    Empty,
    Rune(Rune),
    End,
    Fault(ReadError),
}

/// A cursor for traversing the character source during lexing.
///
/// Accepted characters accumulate in a buffer until [`Cursor::emit`] turns
/// them into a token spanning `start..end`.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    next: Lookahead,
    buffer: String,
    start: Position,
    end: Position,
}

impl<S: RuneSource> Cursor<S> {
    /// Creates a new cursor at the start of the source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            next: Lookahead::Empty,
            buffer: String::new(),
            start: Position::new(),
            end: Position::new(),
        }
    }

    /// Where the pending, not yet emitted, text starts.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Position just past the last accepted character.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Text accepted since the last emitted token.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Returns the next character without consuming it.
    ///
    /// `Ok(None)` means end of input.
    pub fn peek(&mut self) -> Result<Option<char>, ReadError> {
        let next = match mem::replace(&mut self.next, Lookahead::Empty) {
            Lookahead::Empty => match self.source.read_rune() {
                Ok(Some(rune)) => Lookahead::Rune(rune),
                Ok(None) => Lookahead::End,
                Err(err) => Lookahead::Fault(err),
            },
            filled => filled,
        };
        let peeked = match &next {
            Lookahead::Rune(rune) => Ok(Some(rune.ch)),
            Lookahead::Fault(err) => Err(err.clone()),
            Lookahead::End | Lookahead::Empty => Ok(None),
        };
        self.next = next;
        peeked
    }

    /// Consumes the previously peeked character.
    ///
    /// # Panics
    ///
    /// Panics when nothing is peeked: no prior `peek`, the peeked character
    /// was already accepted, or the peek reported end of input or a fault.
    pub fn accept(&mut self) {
        let rune = match mem::replace(&mut self.next, Lookahead::Empty) {
            Lookahead::Rune(rune) => rune,
            other => {
                self.next = other;
                panic!("nothing to accept");
            }
        };
        self.buffer.push(rune.ch);
        self.end.advance(rune.ch, rune.width);
    }

    /// Peeks and accepts one character.
    pub fn read(&mut self) -> Result<Option<char>, ReadError> {
        let ch = self.peek()?;
        if ch.is_some() {
            self.accept();
        }
        Ok(ch)
    }

    /// Drops the accepted text; the next token starts at the current end.
    pub fn discard(&mut self) {
        self.buffer.clear();
        self.start = self.end;
    }

    /// Turns the accepted text into a token and starts a new one.
    pub fn emit(&mut self, kind: TokenKind) -> Token {
        let token = Token {
            kind,
            text: mem::take(&mut self.buffer),
            start: self.start,
            end: self.end,
        };
        self.start = self.end;
        token
    }
}
