//! Lexicons: caller-supplied tables that decide what each statement means.
//!
//! A [`UnitLexicon`] maps section header keywords to [`SectionLexicon`]s.
//! Inside a section, the active section lexicon maps directive names to
//! expand functions and may carry a handler for unknown directives.

use std::collections::HashMap;
use std::fmt;

use crate::statement::Statement;

/// The canonical expanded line: the text of every field.
pub type Line = Vec<String>;

/// Turns a statement into an expanded line.
pub type ExpandFn<L, E> = Box<dyn Fn(&Statement) -> Result<L, E> + Send + Sync>;

/// Decides what to do with a statement whose directive is unknown.
///
/// `Ok(())` drops the statement, an error aborts the parse.
pub type UnknownFn<E> = Box<dyn Fn(&Statement) -> Result<(), E> + Send + Sync>;

/// Expands a statement into its field texts.
pub fn fields_expand<E>(stmt: &Statement) -> Result<Line, E> {
    Ok(stmt.fields())
}

/// Rules for the statements of one section.
pub struct SectionLexicon<L, E> {
    expand: Option<ExpandFn<L, E>>,
    unknown: Option<UnknownFn<E>>,
    directives: HashMap<String, ExpandFn<L, E>>,
}

impl<L, E> SectionLexicon<L, E> {
    /// A section lexicon that knows no directives and drops its header.
    pub fn new() -> Self {
        Self {
            expand: None,
            unknown: None,
            directives: HashMap::new(),
        }
    }

    /// Sets the expand function applied to the section header statement.
    pub fn with_expand<F>(mut self, expand: F) -> Self
    where
        F: Fn(&Statement) -> Result<L, E> + Send + Sync + 'static,
    {
        self.expand = Some(Box::new(expand));
        self
    }

    /// Sets the handler for statements with unknown directives.
    pub fn with_unknown<F>(mut self, unknown: F) -> Self
    where
        F: Fn(&Statement) -> Result<(), E> + Send + Sync + 'static,
    {
        self.unknown = Some(Box::new(unknown));
        self
    }

    /// Registers a directive. A later registration of the same name wins.
    pub fn with_directive<F>(mut self, name: impl Into<String>, expand: F) -> Self
    where
        F: Fn(&Statement) -> Result<L, E> + Send + Sync + 'static,
    {
        self.directives.insert(name.into(), Box::new(expand));
        self
    }

    pub fn expand_fn(&self) -> Option<&ExpandFn<L, E>> {
        self.expand.as_ref()
    }

    pub fn unknown_fn(&self) -> Option<&UnknownFn<E>> {
        self.unknown.as_ref()
    }

    pub fn directive(&self, name: &str) -> Option<&ExpandFn<L, E>> {
        self.directives.get(name)
    }

    /// Names of all registered directives, in no particular order.
    pub fn directives(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }
}

impl<L, E> Default for SectionLexicon<L, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, E> fmt::Debug for SectionLexicon<L, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut directives: Vec<&str> = self.directives().collect();
        directives.sort_unstable();
        f.debug_struct("SectionLexicon")
            .field("expand", &self.expand.is_some())
            .field("unknown", &self.unknown.is_some())
            .field("directives", &directives)
            .finish()
    }
}

/// Rules for a whole unit.
///
/// Every keyword doubles as a section header: a statement whose directive is
/// a keyword closes the current section and starts a new one.
pub struct UnitLexicon<L, E> {
    top_level: SectionLexicon<L, E>,
    sections: HashMap<String, SectionLexicon<L, E>>,
}

impl<L, E> UnitLexicon<L, E> {
    pub fn new() -> Self {
        Self {
            top_level: SectionLexicon::new(),
            sections: HashMap::new(),
        }
    }

    /// Sets the rules for statements that precede the first section header.
    pub fn with_top_level(mut self, section: SectionLexicon<L, E>) -> Self {
        self.top_level = section;
        self
    }

    /// Registers a section header keyword.
    pub fn with_section(mut self, keyword: impl Into<String>, section: SectionLexicon<L, E>) -> Self {
        self.sections.insert(keyword.into(), section);
        self
    }

    pub fn top_level(&self) -> &SectionLexicon<L, E> {
        &self.top_level
    }

    pub fn section(&self, keyword: &str) -> Option<&SectionLexicon<L, E>> {
        self.sections.get(keyword)
    }

    /// All section header keywords, in no particular order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl<L, E> Default for UnitLexicon<L, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, E> fmt::Debug for UnitLexicon<L, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_unstable_by_key(|(keyword, _)| keyword.as_str());
        f.debug_struct("UnitLexicon")
            .field("top_level", &self.top_level)
            .field("sections", &sections)
            .finish()
    }
}
