//! Streaming lexer for line-oriented unit configuration files.
//!
//! Input is pulled one character at a time from a [`RuneSource`] and turned
//! into [`Token`]s of four kinds: separators (`\n`), runs of spaces, text and
//! `#` comments. Backslash escapes and double-quoted spans are kept inside
//! text tokens verbatim; an escaped newline ends its text token so the parser
//! can recognize it as a line fold.

pub mod cursor;
pub mod lexer;
pub mod testing;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, LINE_FOLD};
pub use unitconf_common::{Position, ReadError, ReaderSource, Rune, RuneSource, StrSource};
