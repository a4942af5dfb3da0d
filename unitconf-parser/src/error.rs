use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;
use unitconf_common::{Position, ReadError};

use crate::unit::{Section, Unit};

/// Why a parse stopped early.
///
/// `E` is the error type of the caller's expand and unknown-directive
/// functions; it is kept unchanged as the source.
#[derive(Debug, Error)]
pub enum ParseError<E> {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("cannot expand `{directive}` at {position}")]
    Expand {
        directive: String,
        position: Position,
        #[source]
        source: E,
    },

    #[error("unknown directive `{directive}` at {position}")]
    Unknown {
        directive: String,
        position: Position,
        #[source]
        source: E,
    },
}

impl<E> ParseError<E> {
    /// Where the offending statement starts, if a statement caused the error.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Read(_) => None,
            ParseError::Expand { position, .. } | ParseError::Unknown { position, .. } => {
                Some(*position)
            }
        }
    }

    /// The caller's own error, if one of its functions failed.
    pub fn callback_error(&self) -> Option<&E> {
        match self {
            ParseError::Read(_) => None,
            ParseError::Expand { source, .. } | ParseError::Unknown { source, .. } => Some(source),
        }
    }
}

/// A failed parse together with everything built before the failure.
///
/// `unit` holds the sections closed so far; `pending` holds the lines of the
/// section that was still open.
#[derive(Debug)]
pub struct ParseFailure<L, E> {
    pub unit: Unit<L>,
    pub pending: Section<L>,
    pub error: ParseError<E>,
}

impl<L, E> ParseFailure<L, E> {
    pub fn into_parts(self) -> (Unit<L>, Section<L>, ParseError<E>) {
        (self.unit, self.pending, self.error)
    }

    pub fn into_error(self) -> ParseError<E> {
        self.error
    }
}

impl<L, E> fmt::Display for ParseFailure<L, E>
where
    E: StdError + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<L, E> StdError for ParseFailure<L, E>
where
    L: fmt::Debug,
    E: StdError + 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, Error, PartialEq)]
    #[error("bad value")]
    struct BadValue;

    #[test]
    fn test_expand_error_display_and_source() {
        let err: ParseError<BadValue> = ParseError::Expand {
            directive: "class".to_string(),
            position: Position::at(8, 1, 0),
            source: BadValue,
        };
        assert_eq!(err.to_string(), "cannot expand `class` at 2:1(+8)");
        assert_eq!(err.source().unwrap().to_string(), "bad value");
        assert_eq!(err.callback_error(), Some(&BadValue));
        assert_eq!(err.position(), Some(Position::at(8, 1, 0)));
    }

    #[test]
    fn test_read_error_is_transparent() {
        let err: ParseError<BadValue> = ReadError::from(io::Error::other("disk gone")).into();
        assert_eq!(err.to_string(), "disk gone");
        assert!(err.position().is_none());
    }

    #[test]
    fn test_failure_displays_its_error() {
        let failure: ParseFailure<Vec<String>, BadValue> = ParseFailure {
            unit: Unit::new(),
            pending: Section::new(),
            error: ParseError::Unknown {
                directive: "bogus".to_string(),
                position: Position::new(),
                source: BadValue,
            },
        };
        assert_eq!(failure.to_string(), "unknown directive `bogus` at 1:1(+0)");
        assert_eq!(failure.source().unwrap().to_string(), "bad value");
    }
}
