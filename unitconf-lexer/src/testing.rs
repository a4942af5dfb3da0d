//! Token constructors for tests.
//!
//! Positions are written in their printed form, e.g. `"1:2(+1)"`.

use unitconf_common::Position;

use crate::token::{Token, TokenKind};

pub fn sep(text: &str, start: &str, end: &str) -> Token {
    tok(TokenKind::Separator, text, start, end)
}

pub fn space(text: &str, start: &str, end: &str) -> Token {
    tok(TokenKind::Space, text, start, end)
}

pub fn text(text: &str, start: &str, end: &str) -> Token {
    tok(TokenKind::Text, text, start, end)
}

pub fn comment(text: &str, start: &str, end: &str) -> Token {
    tok(TokenKind::Comment, text, start, end)
}

pub fn tok(kind: TokenKind, text: &str, start: &str, end: &str) -> Token {
    Token::new(kind, text, pos(start), pos(end))
}

/// Parses a printed position.
///
/// # Panics
///
/// Panics on malformed input; these helpers only take literal test data.
pub fn pos(s: &str) -> Position {
    s.parse().unwrap_or_else(|err| panic!("{err}"))
}
