use std::fmt;
use std::str::FromStr;

/// Represents a position in the source text.
///
/// All three fields are 0-based. `offset` counts bytes of decoded characters,
/// `line` and `column` count characters. The printed form is 1-based:
/// `line:column(+offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based)
    pub column: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a position with the given values.
    pub fn at(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Moves past one character of the given encoded width.
    pub fn advance(&mut self, ch: char, width: usize) {
        self.offset += width;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({:+})", self.line + 1, self.column + 1, self.offset)
    }
}

/// Error returned when a `line:column(+offset)` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position {input:?}: expected line:column(+offset)")]
pub struct PositionParseError {
    input: String,
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError {
            input: s.to_string(),
        };
        let (line, rest) = s.split_once(':').ok_or_else(err)?;
        let (column, rest) = rest.split_once('(').ok_or_else(err)?;
        let offset = rest.strip_suffix(')').ok_or_else(err)?;
        let offset = offset.strip_prefix('+').unwrap_or(offset);

        let line: usize = line.trim().parse().map_err(|_| err())?;
        let column: usize = column.trim().parse().map_err(|_| err())?;
        let offset: usize = offset.parse().map_err(|_| err())?;
        if line == 0 || column == 0 {
            return Err(err());
        }
        Ok(Self::at(offset, line - 1, column - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new().to_string(), "1:1(+0)");
        assert_eq!(Position::at(12, 2, 4).to_string(), "3:5(+12)");
    }

    #[test]
    fn test_position_advance() {
        let mut pos = Position::new();
        pos.advance('a', 1);
        assert_eq!(pos, Position::at(1, 0, 1));
        pos.advance('\n', 1);
        assert_eq!(pos, Position::at(2, 1, 0));
        pos.advance('中', 3);
        assert_eq!(pos, Position::at(5, 1, 1));
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("1:1(+0)".parse(), Ok(Position::new()));
        assert_eq!("2:3(+7)".parse(), Ok(Position::at(7, 1, 2)));
        assert_eq!("2:3(7)".parse(), Ok(Position::at(7, 1, 2)));
    }

    #[test]
    fn test_position_from_str_rejects_garbage() {
        assert!("".parse::<Position>().is_err());
        assert!("1:1".parse::<Position>().is_err());
        assert!("0:1(+0)".parse::<Position>().is_err());
        assert!("a:b(+c)".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_round_trips_through_display() {
        let pos = Position::at(41, 6, 9);
        assert_eq!(pos.to_string().parse(), Ok(pos));
    }
}
