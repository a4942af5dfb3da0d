//! Common Framework
//!
//! Components shared by the unitconf lexer and parser: source positions and
//! the character sources both of them read from.

pub mod position;
pub mod source;
pub mod testing;

pub use position::{Position, PositionParseError};
pub use source::{ReadError, ReaderSource, Rune, RuneSource, StrSource};
