use tracing::{debug, trace, warn};
use unitconf_common::{Position, ReadError, RuneSource, StrSource};
use unitconf_lexer::{Lexer, TokenKind};

use crate::error::{ParseError, ParseFailure};
use crate::lexicon::{ExpandFn, SectionLexicon, UnitLexicon};
use crate::statement::Statement;
use crate::unit::{Section, Unit};

/// Assembles lexer tokens into statements and statements into units.
///
/// Spaces, comments and line folds are dropped; a separator ends the
/// statement in progress, and blank lines produce nothing.
#[derive(Debug)]
pub struct Parser<S> {
    lexer: Lexer<S>,
    done: bool,
}

impl<S: RuneSource> Parser<S> {
    /// Creates a new parser reading from the given source.
    pub fn new(source: S) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer<S>) -> Self {
        Self { lexer, done: false }
    }

    pub fn lexer(&self) -> &Lexer<S> {
        &self.lexer
    }

    /// Position just past the last character consumed.
    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    /// Returns the next statement, or `Ok(None)` once the input is exhausted.
    ///
    /// A statement cut short by end of input is still returned; the end is
    /// reported by the following call.
    pub fn next_statement(&mut self) -> Result<Option<Statement>, ReadError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.lexer.next_token()? {
            match token.kind {
                TokenKind::Separator => {
                    if !tokens.is_empty() {
                        break;
                    }
                }
                TokenKind::Text if token.is_line_fold() => {}
                TokenKind::Text => tokens.push(token),
                TokenKind::Space | TokenKind::Comment => {}
            }
        }
        let stmt = Statement::from_tokens(tokens);
        if let Some(stmt) = &stmt {
            trace!(
                target: "unitconf::parser",
                position = %stmt.position(),
                statement = %stmt,
                "assembled statement"
            );
        }
        Ok(stmt)
    }

    /// Parses the remaining input into a unit, driven by `lexicon`.
    ///
    /// Statements before the first section header go to the top-level
    /// section, which is always the first section of a non-empty unit.
    /// Header-opened sections that end up empty are left out.
    pub fn parse<L, E>(&mut self, lexicon: &UnitLexicon<L, E>) -> Result<Unit<L>, ParseFailure<L, E>> {
        let mut builder = UnitBuilder::new(lexicon);
        loop {
            let stmt = match self.next_statement() {
                Ok(Some(stmt)) => stmt,
                Ok(None) => return Ok(builder.finish()),
                Err(err) => return Err(builder.fail(err.into())),
            };
            if let Err(err) = builder.feed(&stmt) {
                warn!(
                    target: "unitconf::parser",
                    directive = stmt.directive(),
                    position = %stmt.position(),
                    "lexicon callback aborted the parse"
                );
                return Err(builder.fail(err));
            }
        }
    }
}

impl<'a> Parser<StrSource<'a>> {
    /// Creates a parser over a string.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(StrSource::new(input))
    }
}

impl<S: RuneSource> Iterator for Parser<S> {
    type Item = Result<Statement, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_statement() {
            Ok(Some(stmt)) => Some(Ok(stmt)),
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

/// Parses everything `source` yields into a unit.
pub fn parse<S, L, E>(source: S, lexicon: &UnitLexicon<L, E>) -> Result<Unit<L>, ParseFailure<L, E>>
where
    S: RuneSource,
{
    Parser::new(source).parse(lexicon)
}

/// Parses a string into a unit.
pub fn parse_str<L, E>(input: &str, lexicon: &UnitLexicon<L, E>) -> Result<Unit<L>, ParseFailure<L, E>> {
    parse(StrSource::new(input), lexicon)
}

/// Dispatches statements through a lexicon and collects the sections.
struct UnitBuilder<'l, L, E> {
    lexicon: &'l UnitLexicon<L, E>,
    active: &'l SectionLexicon<L, E>,
    unit: Unit<L>,
    section: Section<L>,
}

impl<'l, L, E> UnitBuilder<'l, L, E> {
    fn new(lexicon: &'l UnitLexicon<L, E>) -> Self {
        Self {
            lexicon,
            active: lexicon.top_level(),
            unit: Unit::new(),
            section: Section::new(),
        }
    }

    fn feed(&mut self, stmt: &Statement) -> Result<(), ParseError<E>> {
        let directive = stmt.directive();
        let (lexicon, active) = (self.lexicon, self.active);
        let expand = if let Some(next) = lexicon.section(directive) {
            self.close_section();
            self.active = next;
            debug!(
                target: "unitconf::parser",
                section = directive,
                position = %stmt.position(),
                "section started"
            );
            match next.expand_fn() {
                Some(expand) => expand,
                None => return Ok(()),
            }
        } else if let Some(expand) = active.directive(directive) {
            expand
        } else {
            return self.unknown(stmt);
        };
        self.expand(expand, stmt)
    }

    fn expand(&mut self, expand: &ExpandFn<L, E>, stmt: &Statement) -> Result<(), ParseError<E>> {
        let line = expand(stmt).map_err(|source| ParseError::Expand {
            directive: stmt.directive().to_string(),
            position: stmt.position(),
            source,
        })?;
        self.section.push(line);
        Ok(())
    }

    fn unknown(&mut self, stmt: &Statement) -> Result<(), ParseError<E>> {
        if let Some(unknown) = self.active.unknown_fn() {
            unknown(stmt).map_err(|source| ParseError::Unknown {
                directive: stmt.directive().to_string(),
                position: stmt.position(),
                source,
            })?;
        }
        debug!(
            target: "unitconf::parser",
            directive = stmt.directive(),
            position = %stmt.position(),
            "dropped unknown directive"
        );
        Ok(())
    }

    /// Pushes the current section if it is non-empty or would be the
    /// top-level one.
    fn close_section(&mut self) {
        if !self.section.is_empty() || self.unit.is_empty() {
            let section = std::mem::take(&mut self.section);
            self.unit.push(section);
        }
    }

    fn finish(mut self) -> Unit<L> {
        self.close_section();
        self.unit
    }

    fn fail(self, error: ParseError<E>) -> ParseFailure<L, E> {
        ParseFailure {
            unit: self.unit,
            pending: self.section,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{fields_expand, Line};
    use std::convert::Infallible;

    fn init_lexicon() -> UnitLexicon<Line, Infallible> {
        UnitLexicon::new()
            .with_section("import", SectionLexicon::new().with_expand(fields_expand))
            .with_section("on", SectionLexicon::new().with_expand(fields_expand))
            .with_section(
                "service",
                SectionLexicon::new()
                    .with_expand(fields_expand)
                    .with_directive("class", fields_expand),
            )
    }

    fn fields(parser: &mut Parser<StrSource<'_>>) -> Vec<Vec<String>> {
        parser.map(|stmt| stmt.unwrap().fields()).collect()
    }

    #[test]
    fn test_statements_skip_blank_lines_and_comments() {
        let mut parser = Parser::from_text("\n\n# comment\na  b # trailing\n\nc\n");
        assert_eq!(fields(&mut parser), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_statement_at_end_of_input_defers_the_end() {
        let mut parser = Parser::from_text("a b");
        assert_eq!(parser.next_statement().unwrap().unwrap().fields(), vec!["a", "b"]);
        assert!(parser.next_statement().unwrap().is_none());
        assert!(parser.next_statement().unwrap().is_none());
    }

    #[test]
    fn test_line_fold_joins_lines() {
        let mut parser = Parser::from_text("exec a \\\n  b\nnext\n");
        assert_eq!(fields(&mut parser), vec![vec!["exec", "a", "b"], vec!["next"]]);
    }

    #[test]
    fn test_parse_init_config() {
        let input = "\
import /etc/init/extra.conf

on boot
    start core

service core /bin/core --daemon
    class main
    user root
";
        let unit = parse_str(input, &init_lexicon()).unwrap();
        assert_eq!(
            unit.into_inner(),
            vec![
                vec![],
                vec![vec!["import", "/etc/init/extra.conf"]],
                vec![vec!["on", "boot"]],
                vec![
                    vec!["service", "core", "/bin/core", "--daemon"],
                    vec!["class", "main"],
                ],
            ]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_top_level() {
        let unit = parse_str("", &init_lexicon()).unwrap();
        assert_eq!(unit.len(), 1);
        assert!(unit.top_level().unwrap().is_empty());
    }
}
