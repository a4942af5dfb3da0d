//! Builds parser lexicons from schemas.

use thiserror::Error;
use unitconf_parser::{fields_expand, Line, SectionLexicon, Statement, UnitLexicon};

use crate::config::{LexiconSchema, SectionSchema, UnknownPolicy};

/// Errors raised by schema-built lexicon functions during a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("directive `{0}` is not allowed in this section")]
    UnknownDirective(String),
}

pub type SchemaLexicon = UnitLexicon<Line, SchemaError>;

pub fn build_lexicon(schema: &LexiconSchema) -> SchemaLexicon {
    let mut lexicon = UnitLexicon::new();
    if let Some(top_level) = &schema.top_level {
        lexicon = lexicon.with_top_level(build_section(top_level));
    }
    for (keyword, section) in &schema.sections {
        lexicon = lexicon.with_section(keyword.as_str(), build_section(section));
    }
    lexicon
}

fn build_section(schema: &SectionSchema) -> SectionLexicon<Line, SchemaError> {
    let mut section = SectionLexicon::new();
    if schema.expand {
        section = section.with_expand(fields_expand);
    }
    for directive in &schema.directives {
        section = section.with_directive(directive.as_str(), fields_expand);
    }
    match schema.unknown {
        Some(UnknownPolicy::Reject) => section.with_unknown(reject),
        Some(UnknownPolicy::Ignore) => section.with_unknown(|_: &Statement| Ok(())),
        None => section,
    }
}

fn reject(stmt: &Statement) -> Result<(), SchemaError> {
    Err(SchemaError::UnknownDirective(stmt.directive().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::Path;
    use unitconf_parser::{parse_str, ParseError};

    fn schema(json: &str) -> LexiconSchema {
        LexiconSchema::from_json(Path::new("test.json"), json).unwrap()
    }

    #[rstest]
    #[case::header_and_directive("service a\nclass x\n", vec![
        vec![],
        vec![vec!["service", "a"], vec!["class", "x"]],
    ])]
    #[case::unknown_is_dropped("service a\nuser root\n", vec![
        vec![],
        vec![vec!["service", "a"]],
    ])]
    #[case::top_level_is_dropped("class x\nimport a.conf\n", vec![
        vec![],
        vec![vec!["import", "a.conf"]],
    ])]
    fn test_builtin_lexicon(#[case] input: &str, #[case] expected: Vec<Vec<Vec<&str>>>) {
        let lexicon = build_lexicon(&LexiconSchema::builtin());
        assert_eq!(parse_str(input, &lexicon).unwrap().into_inner(), expected);
    }

    #[rstest]
    #[case::ignore(r#"{ "sections": { "service": { "directives": ["class"], "unknown": "ignore" } } }"#)]
    #[case::no_policy(r#"{ "sections": { "service": { "directives": ["class"] } } }"#)]
    fn test_unknown_directive_is_dropped(#[case] json: &str) {
        let lexicon = build_lexicon(&schema(json));
        let unit = parse_str("service a\nuser root\nclass x\n", &lexicon).unwrap();
        assert_eq!(
            unit.into_inner(),
            vec![vec![], vec![vec!["service", "a"], vec!["class", "x"]]]
        );
    }

    #[test]
    fn test_reject_policy() {
        let lexicon = build_lexicon(&schema(
            r#"{ "sections": { "service": { "directives": ["class"], "unknown": "reject" } } }"#,
        ));
        let failure = parse_str("service a\nclass x\nuser root\n", &lexicon).unwrap_err();
        match failure.error {
            ParseError::Unknown { source, .. } => {
                assert_eq!(source, SchemaError::UnknownDirective("user".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_without_expand() {
        let lexicon = build_lexicon(&schema(
            r#"{ "top_level": { "directives": ["version"] },
                 "sections": { "service": { "expand": false, "directives": ["class"] } } }"#,
        ));
        let unit = parse_str("version 1\nservice\nclass x\n", &lexicon).unwrap();
        assert_eq!(
            unit.into_inner(),
            vec![vec![vec!["version", "1"]], vec![vec!["class", "x"]]]
        );
    }
}
