//! Test support: a character source that replays a fixed script.

use std::io;

use crate::source::{ReadError, Rune, RuneSource};

/// One scripted result of [`RuneSource::read_rune`].
#[derive(Debug, Clone)]
pub enum Step {
    Rune(Rune),
    End,
    Fault(ReadError),
}

impl Step {
    pub fn rune(ch: char, width: usize) -> Self {
        Step::Rune(Rune::new(ch, width))
    }

    /// A fault carrying an I/O error with the given message.
    pub fn fault(message: &str) -> Self {
        Step::Fault(io::Error::other(message.to_string()).into())
    }
}

/// Reproduces a sequence of read results, one per call.
///
/// Reading past the end of the script yields [`ReadError::Exhausted`], so a
/// test notices when the code under test reads more than it should.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    steps: Vec<Step>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, pos: 0 }
    }

    /// Scripts every character of `input` (at its UTF-8 width), then end of input.
    pub fn from_str_then_end(input: &str) -> Self {
        let mut steps: Vec<Step> = input.chars().map(|ch| Step::Rune(ch.into())).collect();
        steps.push(Step::End);
        Self::new(steps)
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.pos
    }
}

impl RuneSource for ScriptedSource {
    fn read_rune(&mut self) -> Result<Option<Rune>, ReadError> {
        let step = self.steps.get(self.pos).cloned();
        self.pos += 1;
        match step {
            Some(Step::Rune(rune)) => Ok(Some(rune)),
            Some(Step::End) => Ok(None),
            Some(Step::Fault(err)) => Err(err),
            None => Err(ReadError::Exhausted),
        }
    }
}
