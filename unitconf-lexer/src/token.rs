use std::fmt;

use unitconf_common::Position;

/// Text of the token produced for an escaped newline.
pub const LINE_FOLD: &str = "\\\n";

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single `\n`.
    Separator,
    /// A run of space characters other than `\n`.
    Space,
    /// Anything else, including escapes and quoted spans.
    Text,
    /// `#` up to, but excluding, the end of the line.
    Comment,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Separator => "separator",
            TokenKind::Space => "space",
            TokenKind::Text => "text",
            TokenKind::Comment => "comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by the lexer.
///
/// `end.offset - start.offset` is always the byte length of `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for the text token an escaped newline produces.
    pub fn is_line_fold(&self) -> bool {
        self.kind == TokenKind::Text && self.text == LINE_FOLD
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {:?} {} {} ({:+})]",
            self.kind,
            self.text,
            self.start,
            self.end,
            self.len()
        )
    }
}
