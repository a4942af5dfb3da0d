use tracing::trace;
use unitconf_common::{Position, ReadError, RuneSource};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Pull-based lexer over a character source.
///
/// Each call to [`Lexer::next_token`] runs the state machine from its
/// initial state until one token is complete. The lexer is also an
/// [`Iterator`] that stops after end of input or the first read fault.
#[derive(Debug)]
pub struct Lexer<S> {
    cursor: Cursor<S>,
    done: bool,
}

impl<S: RuneSource> Lexer<S> {
    /// Creates a new lexer reading from the given source.
    pub fn new(source: S) -> Self {
        Self {
            cursor: Cursor::new(source),
            done: false,
        }
    }

    /// Position just past the last character consumed.
    pub fn position(&self) -> Position {
        self.cursor.end()
    }

    /// Returns the next token, or `Ok(None)` once the input is exhausted.
    ///
    /// A read fault is returned as is; any text accepted for the token in
    /// progress is discarded with it.
    pub fn next_token(&mut self) -> Result<Option<Token>, ReadError> {
        let Some(ch) = self.cursor.peek()? else {
            trace!(target: "unitconf::lexer", position = %self.cursor.end(), "end of input");
            return Ok(None);
        };
        let scanned = match ch {
            '#' => self.comment_state(),
            '\n' => Ok(self.separator_state()),
            c if c.is_whitespace() => self.spaces_state(),
            _ => self.text_state(),
        };
        let token = match scanned {
            Ok(token) => token,
            Err(err) => {
                self.cursor.discard();
                return Err(err);
            }
        };
        trace!(
            target: "unitconf::lexer",
            kind = %token.kind,
            text = ?token.text,
            start = %token.start,
            end = %token.end,
            "produced token"
        );
        Ok(Some(token))
    }

    /// Collects all remaining tokens.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ReadError> {
        self.collect()
    }

    fn separator_state(&mut self) -> Token {
        // the newline was peeked by the caller
        self.cursor.accept();
        self.cursor.emit(TokenKind::Separator)
    }

    fn comment_state(&mut self) -> Result<Token, ReadError> {
        while let Some(ch) = self.cursor.peek()? {
            if ch == '\n' {
                break;
            }
            self.cursor.accept();
        }
        Ok(self.cursor.emit(TokenKind::Comment))
    }

    fn spaces_state(&mut self) -> Result<Token, ReadError> {
        while let Some(ch) = self.cursor.peek()? {
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.cursor.accept();
        }
        Ok(self.cursor.emit(TokenKind::Space))
    }

    fn text_state(&mut self) -> Result<Token, ReadError> {
        while let Some(ch) = self.cursor.peek()? {
            match ch {
                '#' => break,
                c if c.is_whitespace() => break,
                '\\' => {
                    self.cursor.accept();
                    // an escaped newline ends the token: it is a line fold
                    if self.cursor.read()? == Some('\n') {
                        break;
                    }
                }
                '"' => {
                    self.cursor.accept();
                    self.quoted_text()?;
                }
                _ => self.cursor.accept(),
            }
        }
        Ok(self.cursor.emit(TokenKind::Text))
    }

    /// Scans the rest of a quoted span; the opening quote is already accepted.
    ///
    /// Stops after the closing quote, before a newline, or at end of input.
    fn quoted_text(&mut self) -> Result<(), ReadError> {
        while let Some(ch) = self.cursor.peek()? {
            match ch {
                '\n' => return Ok(()),
                '"' => {
                    self.cursor.accept();
                    return Ok(());
                }
                '\\' => {
                    self.cursor.accept();
                    self.cursor.read()?;
                }
                _ => self.cursor.accept(),
            }
        }
        Ok(())
    }
}

impl<'a> Lexer<unitconf_common::StrSource<'a>> {
    /// Creates a lexer over a string.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(unitconf_common::StrSource::new(input))
    }
}

impl<S: RuneSource> Iterator for Lexer<S> {
    type Item = Result<Token, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
