//! Descriptor entity - sectioned key/value metadata (`default/app.conf`)
//!
//! The in-memory model keeps every line it does not touch byte-for-byte so
//! a rewrite only changes the keys that were set. Sections and keys keep
//! their insertion order.
//!
//! ```text
//! # comment
//! [launcher]
//! version = 1.2.3
//! label = Search Tools v1.2.3
//!
//! [install]
//! build = 202601011200
//! ```

use std::fmt;

use thiserror::Error;

/// Descriptor text could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct DescriptorParseError {
    pub line: usize,
    pub message: String,
}

impl DescriptorParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A `key = value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// Original line text; dropped once the value is changed
    raw: Option<String>,
}

impl Entry {
    fn render(&self) -> String {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => format!("{} = {}", self.key, self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry(Entry),
    /// Comments, blank lines and continuation lines
    Raw(String),
}

/// A `[name]` stanza and its lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    header: Option<String>,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header: None,
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in file order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Raw(_) => None,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .find(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a key, updating in place or appending after the last entry
    pub fn set(&mut self, key: &str, value: &str) {
        for line in &mut self.lines {
            if let Line::Entry(entry) = line {
                if entry.key.eq_ignore_ascii_case(key) {
                    if entry.value != value {
                        entry.value = value.to_string();
                        entry.raw = None;
                    }
                    return;
                }
            }
        }

        let insert_at = self
            .lines
            .iter()
            .rposition(|l| matches!(l, Line::Entry(_)))
            .map(|i| self.continuation_end(i))
            .unwrap_or(0);
        self.lines.insert(
            insert_at,
            Line::Entry(Entry {
                key: key.to_string(),
                value: value.to_string(),
                raw: None,
            }),
        );
    }

    /// Index just past an entry and any indented continuation lines
    fn continuation_end(&self, entry_index: usize) -> usize {
        let mut end = entry_index + 1;
        while let Some(Line::Raw(raw)) = self.lines.get(end) {
            if is_continuation(raw) {
                end += 1;
            } else {
                break;
            }
        }
        end
    }

    fn ends_with_blank(&self) -> bool {
        matches!(self.lines.last(), Some(Line::Raw(raw)) if raw.trim().is_empty())
    }
}

/// Parsed descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
    /// Comments and blank lines before the first section
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse descriptor text.
    ///
    /// Rejects key/value lines outside a section, unterminated or empty
    /// section headers, duplicate sections and lines without `=`.
    pub fn parse(content: &str) -> Result<Self, DescriptorParseError> {
        let mut descriptor = Self::new();
        let mut last_was_entry = false;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                descriptor.push_raw(raw);
                last_was_entry = false;
                continue;
            }

            if is_continuation(raw) {
                if !last_was_entry {
                    return Err(DescriptorParseError::new(
                        line_no,
                        "indented line does not continue a value",
                    ));
                }
                descriptor.push_raw(raw);
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| {
                        DescriptorParseError::new(line_no, "unterminated section header")
                    })?
                    .trim();
                if name.is_empty() {
                    return Err(DescriptorParseError::new(line_no, "empty section name"));
                }
                if descriptor.has_section(name) {
                    return Err(DescriptorParseError::new(
                        line_no,
                        format!("duplicate section [{name}]"),
                    ));
                }
                let mut section = Section::new(name);
                section.header = Some(raw.to_string());
                descriptor.sections.push(section);
                last_was_entry = false;
                continue;
            }

            let (key, value) = raw.split_once('=').ok_or_else(|| {
                DescriptorParseError::new(line_no, format!("expected 'key = value', got '{trimmed}'"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(DescriptorParseError::new(line_no, "empty key"));
            }
            let section = descriptor.sections.last_mut().ok_or_else(|| {
                DescriptorParseError::new(line_no, format!("key '{key}' appears before any section"))
            })?;
            section.lines.push(Line::Entry(Entry {
                key: key.to_string(),
                value: value.trim().to_string(),
                raw: Some(raw.to_string()),
            }));
            last_was_entry = true;
        }

        Ok(descriptor)
    }

    fn push_raw(&mut self, raw: &str) {
        match self.sections.last_mut() {
            Some(section) => section.lines.push(Line::Raw(raw.to_string())),
            None => self.preamble.push(raw.to_string()),
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Get a section, appending an empty one if it does not exist
    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        if let Some(index) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[index];
        }

        let needs_gap = match self.sections.last() {
            Some(last) => !last.lines.is_empty() && !last.ends_with_blank(),
            None => self.preamble.last().is_some_and(|l| !l.trim().is_empty()),
        };
        if needs_gap {
            self.push_raw("");
        }

        self.sections.push(Section::new(name));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    pub fn contains_key(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(default)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ensure_section(section).set(key, value);
    }

    /// Serialize back to text with a trailing newline
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for section in &self.sections {
            match &section.header {
                Some(header) => out.push_str(header),
                None => {
                    out.push('[');
                    out.push_str(&section.name);
                    out.push(']');
                }
            }
            out.push('\n');
            for line in &section.lines {
                match line {
                    Line::Entry(entry) => out.push_str(&entry.render()),
                    Line::Raw(raw) => out.push_str(raw),
                }
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn is_continuation(raw: &str) -> bool {
    raw.starts_with([' ', '\t']) && !raw.trim().is_empty()
}
