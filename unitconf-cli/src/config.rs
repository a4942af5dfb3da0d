//! CLI configuration: logging levels and lexicon schema files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::Level;

use crate::error::CliError;

/// Environment variable holding the global log level.
pub const LOG_ENV: &str = "UNITCONF_LOG";

/// Log levels, globally and per component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub global: Level,
    pub lexer: Option<Level>,
    pub parser: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            lexer: None,
            parser: None,
        }
    }
}

impl LogConfig {
    /// Combines command line levels with the environment.
    ///
    /// A level given on the command line wins over `UNITCONF_LOG`.
    pub fn resolve(
        global: Option<Level>,
        lexer: Option<Level>,
        parser: Option<Level>,
        env: Option<&str>,
    ) -> Result<Self, CliError> {
        let from_env = match env.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Some(value.parse::<Level>().map_err(|_| CliError::LogLevel {
                origin: LOG_ENV,
                value: value.to_string(),
            })?),
            None => None,
        };
        Ok(Self {
            global: global.or(from_env).unwrap_or(Self::default().global),
            lexer,
            parser,
        })
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "unitconf::lexer" => self.lexer.unwrap_or(self.global),
            "unitconf::parser" => self.parser.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

/// What to do with statements whose directive a section does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    Ignore,
    Reject,
}

/// Schema of one section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSchema {
    /// Keep the header line in the section.
    #[serde(default = "default_expand")]
    pub expand: bool,
    #[serde(default)]
    pub directives: Vec<String>,
    #[serde(default)]
    pub unknown: Option<UnknownPolicy>,
}

fn default_expand() -> bool {
    true
}

impl SectionSchema {
    fn with_directives(directives: &[&str]) -> Self {
        Self {
            expand: true,
            directives: directives.iter().map(|d| d.to_string()).collect(),
            unknown: None,
        }
    }
}

/// Lexicon description loaded from a JSON file.
///
/// ```json
/// {
///   "top_level": { "directives": ["version"] },
///   "sections": {
///     "service": { "directives": ["class", "user"], "unknown": "reject" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconSchema {
    #[serde(default)]
    pub top_level: Option<SectionSchema>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionSchema>,
}

impl LexiconSchema {
    /// The init-style lexicon used when no schema file is given.
    pub fn builtin() -> Self {
        let sections = [
            ("import", SectionSchema::with_directives(&[])),
            ("on", SectionSchema::with_directives(&[])),
            ("service", SectionSchema::with_directives(&["class"])),
        ];
        Self {
            top_level: None,
            sections: sections
                .into_iter()
                .map(|(keyword, section)| (keyword.to_string(), section))
                .collect(),
        }
    }

    pub fn from_json(path: &Path, content: &str) -> Result<Self, CliError> {
        serde_json::from_str(content).map_err(|source| CliError::SchemaFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::SchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_line_level_wins() {
        let config = LogConfig::resolve(Some(Level::DEBUG), None, Some(Level::TRACE), Some("error")).unwrap();
        assert_eq!(config.global, Level::DEBUG);
        assert_eq!(config.level_for("unitconf::lexer"), Level::DEBUG);
        assert_eq!(config.level_for("unitconf::parser"), Level::TRACE);
    }

    #[test]
    fn test_env_level_is_used() {
        let config = LogConfig::resolve(None, None, None, Some(" info ")).unwrap();
        assert_eq!(config.global, Level::INFO);
        let config = LogConfig::resolve(None, None, None, Some("")).unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_bad_env_level() {
        let err = LogConfig::resolve(None, None, None, Some("loud")).unwrap_err();
        assert_eq!(err.to_string(), "invalid log level `loud` in UNITCONF_LOG");
    }

    #[test]
    fn test_schema_defaults() {
        let schema = LexiconSchema::from_json(
            Path::new("schema.json"),
            r#"{ "sections": { "service": { "directives": ["class"], "unknown": "reject" } } }"#,
        )
        .unwrap();
        let service = &schema.sections["service"];
        assert!(service.expand);
        assert_eq!(service.directives, vec!["class"]);
        assert_eq!(service.unknown, Some(UnknownPolicy::Reject));
        assert!(schema.top_level.is_none());
    }

    #[test]
    fn test_schema_rejects_unknown_fields() {
        let err = LexiconSchema::from_json(Path::new("schema.json"), r#"{ "section": {} }"#).unwrap_err();
        assert!(matches!(err, CliError::SchemaFormat { .. }));
        assert_eq!(err.to_string(), "invalid lexicon schema `schema.json`");
    }

    #[test]
    fn test_builtin_schema() {
        let schema = LexiconSchema::builtin();
        assert_eq!(schema.sections.keys().collect::<Vec<_>>(), vec!["import", "on", "service"]);
        assert_eq!(schema.sections["service"].directives, vec!["class"]);
    }
}
