//! Structural parser for line-oriented unit configuration files.
//!
//! The [`Parser`] folds lexer tokens into [`Statement`]s and, driven by a
//! caller-supplied [`UnitLexicon`], groups the expanded statements into the
//! [`Section`]s of a [`Unit`].

pub mod error;
pub mod lexicon;
pub mod parser;
pub mod statement;
pub mod unit;

pub use error::{ParseError, ParseFailure};
pub use lexicon::{fields_expand, ExpandFn, Line, SectionLexicon, UnitLexicon, UnknownFn};
pub use parser::{parse, parse_str, Parser};
pub use statement::Statement;
pub use unit::{Section, Unit};
pub use unitconf_common::{Position, ReadError, ReaderSource, RuneSource, StrSource};
pub use unitconf_lexer::{Token, TokenKind};
