use std::fmt;

use unitconf_common::Position;
use unitconf_lexer::Token;

/// A non-empty sequence of text tokens forming one logical line.
///
/// Comments, spaces and line folds are already removed. The first token is
/// the directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    tokens: Vec<Token>,
}

impl Statement {
    /// Wraps the tokens, or returns `None` if there are none.
    pub fn from_tokens(tokens: Vec<Token>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// The directive name, i.e. the text of the first token.
    pub fn directive(&self) -> &str {
        &self.directive_token().text
    }

    pub fn directive_token(&self) -> &Token {
        &self.tokens[0]
    }

    /// Where the statement starts.
    pub fn position(&self) -> Position {
        self.directive_token().start
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text of every field, directive included.
    pub fn fields(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A statement is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a Statement {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitconf_lexer::testing::text;

    #[test]
    fn test_empty_tokens_are_not_a_statement() {
        assert!(Statement::from_tokens(Vec::new()).is_none());
    }

    #[test]
    fn test_statement_accessors() {
        let stmt = Statement::from_tokens(vec![
            text("class", "1:1(+0)", "1:6(+5)"),
            text("core", "1:7(+6)", "1:11(+10)"),
        ])
        .unwrap();
        assert_eq!(stmt.directive(), "class");
        assert_eq!(stmt.fields(), vec!["class", "core"]);
        assert_eq!(stmt.position().to_string(), "1:1(+0)");
        assert_eq!(stmt.len(), 2);
        assert!(!stmt.is_empty());
        assert_eq!(stmt.to_string(), "class core");
    }
}
