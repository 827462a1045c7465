//! # Doxygen Configuration Files
//!
//! A configuration file is parsed into lines that remember where they came
//! from: an *entry* (`KEY = value`, `KEY += value`, possibly continued onto
//! following lines with a trailing `\`) or a *verbatim* line (comments,
//! blanks, `@INCLUDE` directives, anything else). Rendering with a
//! [`ConfigSet`] rewrites the entries of recognized keys and copies every
//! other line exactly as read.

use std::path::Path;

use crate::error::DocsError;
use crate::keys::ConfigKey;
use crate::set::ConfigSet;

/// Column the `=` sits at for keys appended to a file, matching the layout
/// `doxygen -g` produces.
const KEY_COLUMN: usize = 23;

/// Assignment operator of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `KEY = value`
    Assign,
    /// `KEY += value`
    Append,
}

/// A `KEY = value` entry and the raw lines it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    operator: Operator,
    value: String,
    /// Raw text before the operator, including the key's padding.
    lead: String,
    raw: Vec<String>,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value with continuation lines joined by single spaces.
    pub fn value(&self) -> &str {
        &self.value
    }

    fn push_piece(&mut self, piece: &str) {
        let piece = piece.trim();
        if piece.is_empty() {
            return;
        }
        if !self.value.is_empty() {
            self.value.push(' ');
        }
        self.value.push_str(piece);
    }

    fn rewritten(&self, value: &str) -> String {
        format!("{}= {}", self.lead, value).trim_end().to_string()
    }
}

/// One line (or continued group of lines) of a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Entry(Entry),
    Verbatim(String),
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    lines: Vec<Line>,
    /// Lines end in `\r\n` rather than `\n`.
    crlf: bool,
}

impl ConfigFile {
    /// Parse configuration text. Parsing never fails: lines that are not
    /// entries are kept verbatim.
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut continuing: Option<Entry> = None;

        for raw in text.lines() {
            if let Some(mut entry) = continuing.take() {
                entry.raw.push(raw.to_string());
                let (piece, continues) = split_continuation(raw);
                entry.push_piece(piece);
                if continues {
                    continuing = Some(entry);
                } else {
                    lines.push(Line::Entry(entry));
                }
                continue;
            }

            match parse_entry(raw) {
                Some((entry, true)) => continuing = Some(entry),
                Some((entry, false)) => lines.push(Line::Entry(entry)),
                None => lines.push(Line::Verbatim(raw.to_string())),
            }
        }

        // A trailing backslash on the last line has nothing left to join.
        if let Some(entry) = continuing {
            lines.push(Line::Entry(entry));
        }

        Self {
            lines,
            crlf: text.contains("\r\n"),
        }
    }

    /// Read and parse a configuration file.
    pub fn read(path: &Path) -> Result<Self, DocsError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Verbatim(_) => None,
        })
    }

    /// Effective value of `key`: the last `=` wins and each later `+=`
    /// appends to it. `None` when the key never appears.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut value: Option<String> = None;
        for entry in self.entries().filter(|e| e.key == key) {
            match (entry.operator, value.as_mut()) {
                (Operator::Append, Some(current)) if !entry.value.is_empty() => {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(&entry.value);
                }
                (Operator::Append, Some(_)) => {}
                _ => value = Some(entry.value.clone()),
            }
        }
        value
    }

    /// Render the file with recognized keys taken from `set`.
    ///
    /// Entries of recognized keys are rewritten as `KEY = value`, keeping
    /// the original key padding and dropping their continuation lines.
    /// Every other line is emitted as read. Recognized keys that never
    /// appear in the file are appended at the end.
    pub fn render(&self, set: &ConfigSet) -> String {
        let newline = if self.crlf { "\r\n" } else { "\n" };
        let mut out = String::new();
        let mut seen = Vec::new();

        for line in &self.lines {
            match line {
                Line::Verbatim(raw) => push_line(&mut out, raw, newline),
                Line::Entry(entry) => match ConfigKey::from_name(&entry.key) {
                    Some(key) => {
                        seen.push(key);
                        push_line(&mut out, &entry.rewritten(set.get(key)), newline);
                    }
                    None => {
                        for raw in &entry.raw {
                            push_line(&mut out, raw, newline);
                        }
                    }
                },
            }
        }

        for key in ConfigKey::ALL {
            if !seen.contains(&key) {
                let line = format!("{:<width$}= {}", key.as_str(), set.get(key), width = KEY_COLUMN);
                push_line(&mut out, line.trim_end(), newline);
            }
        }

        out
    }

    /// Render with `set` and write the result to `path`.
    pub fn write_with(&self, path: &Path, set: &ConfigSet) -> Result<(), DocsError> {
        std::fs::write(path, self.render(set)).map_err(|source| DocsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn push_line(out: &mut String, line: &str, newline: &str) {
    out.push_str(line);
    out.push_str(newline);
}

/// Split a trailing continuation backslash off a line.
fn split_continuation(raw: &str) -> (&str, bool) {
    let trimmed = raw.trim_end();
    match trimmed.strip_suffix('\\') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    }
}

/// Parse an entry line. Returns the entry and whether it continues onto
/// the next line.
fn parse_entry(raw: &str) -> Option<(Entry, bool)> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let eq = raw.find('=')?;
    let (before, after) = (&raw[..eq], &raw[eq + 1..]);
    let (lead, operator) = match before.strip_suffix('+') {
        Some(lead) => (lead, Operator::Append),
        None => (before, Operator::Assign),
    };

    let key = lead.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let (piece, continues) = split_continuation(after);
    let mut entry = Entry {
        key: key.to_string(),
        operator,
        value: String::new(),
        lead: lead.to_string(),
        raw: vec![raw.to_string()],
    };
    entry.push_piece(piece);
    Some((entry, continues))
}
