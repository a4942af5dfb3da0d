//! The parse result: a unit made of sections of expanded lines.

/// The expanded lines of one section, in input order.
///
/// For a section opened by a header, the first line is the expanded header
/// (when the section lexicon has an expand function).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<L> {
    lines: Vec<L>,
}

impl<L> Section<L> {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn push(&mut self, line: L) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.lines.iter()
    }

    pub fn into_lines(self) -> Vec<L> {
        self.lines
    }
}

impl<L> Default for Section<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> From<Vec<L>> for Section<L> {
    fn from(lines: Vec<L>) -> Self {
        Self { lines }
    }
}

impl<'a, L> IntoIterator for &'a Section<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// An ordered list of sections.
///
/// A unit returned by a successful parse always starts with the implicit
/// top-level section, which may itself be empty. Only the partial unit of a
/// failed parse can hold no section at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit<L> {
    sections: Vec<Section<L>>,
}

impl<L> Unit<L> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section<L>) {
        self.sections.push(section);
    }

    /// The implicit section holding lines seen before the first header.
    pub fn top_level(&self) -> Option<&Section<L>> {
        self.sections.first()
    }

    /// Sections opened by a header, i.e. all but the top-level one.
    pub fn sections(&self) -> &[Section<L>] {
        self.sections.get(1..).unwrap_or(&[])
    }

    /// Number of sections, top-level included.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section<L>> {
        self.sections.iter()
    }

    /// Unwraps the unit into plain nested vectors.
    pub fn into_inner(self) -> Vec<Vec<L>> {
        self.sections.into_iter().map(Section::into_lines).collect()
    }
}

impl<L> Default for Unit<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, L> IntoIterator for &'a Unit<L> {
    type Item = &'a Section<L>;
    type IntoIter = std::slice::Iter<'a, Section<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl<L> IntoIterator for Unit<L> {
    type Item = Section<L>;
    type IntoIter = std::vec::IntoIter<Section<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}
