//! Parsers for the plain-text source documents.
//!
//! `project` turns `projects/<id>.txt` into a `ProjectRecord`; `profile`
//! handles `about/profile.txt`. Neither parser fails: unrecognized lines are
//! skipped and missing sections leave their fields at defaults.

pub mod profile;
pub mod project;

pub use profile::parse_profile;
pub use project::{Section, parse_project};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a source text file, replacing invalid UTF-8 instead of failing.
pub fn read_source_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Forward-only cursor over document lines.
pub(crate) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the next line only when `accept` approves it.
    pub(crate) fn advance_if(&mut self, accept: impl Fn(&str) -> bool) -> Option<&'a str> {
        match self.peek() {
            Some(line) if accept(line) => self.advance(),
            _ => None,
        }
    }

    pub(crate) fn skip_blank(&mut self) {
        while self.advance_if(is_blank).is_some() {}
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
