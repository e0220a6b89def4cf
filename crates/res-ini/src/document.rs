//! Line-preserving INI document model
//!
//! A document is a preamble (comments and blank lines before the first
//! section header) followed by named sections. Section bodies keep
//! their comment and blank lines, so content owned by other tools
//! survives a rewrite of the sections this tool manages.

use crate::error::{Error, Result};
use crate::settings::SettingsBlock;

/// A single body line inside a section or the preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    /// A comment line, stored verbatim (including the `#` or `;`).
    Comment(String),
    Setting {
        key: String,
        value: String,
    },
}

/// A named section with its body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Setting { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// The section's settings in order, without comments and blanks.
    pub fn settings(&self) -> SettingsBlock {
        let mut settings = SettingsBlock::new();
        for line in &self.lines {
            if let Line::Setting { key, value } = line {
                settings.insert(key.as_str(), value.as_str());
            }
        }
        settings
    }

    /// Replace the whole body with the given settings.
    fn set_settings(&mut self, settings: &SettingsBlock) {
        self.lines = settings
            .iter()
            .map(|(key, value)| Line::Setting {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();
    }

    fn ends_with_blank(&self) -> bool {
        matches!(self.lines.last(), Some(Line::Blank))
    }
}

/// A parsed INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    preamble: Vec<Line>,
    sections: Vec<Section>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from text.
    ///
    /// Accepts `[section]` headers, `key = value` settings with quoted
    /// or bare values, `#`/`;` comments, and blank lines. A setting
    /// before the first section header is an error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut document = Self::new();
        let mut current: Option<Section> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            let line = if trimmed.is_empty() {
                Line::Blank
            } else if trimmed.starts_with('#') || trimmed.starts_with(';') {
                Line::Comment(raw.to_string())
            } else if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| Error::parse(line_no, "unterminated section header"))?
                    .trim();
                validate_section_name(name)
                    .map_err(|_| Error::parse(line_no, format!("invalid section name {name:?}")))?;

                if let Some(section) = current.take() {
                    document.sections.push(section);
                }
                current = Some(Section::new(name));
                continue;
            } else if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    return Err(Error::parse(line_no, "setting without a key"));
                }
                if current.is_none() {
                    return Err(Error::parse(line_no, "setting before any section header"));
                }
                Line::Setting {
                    key: key.to_string(),
                    value: unquote_value(value.trim(), line_no)?,
                }
            } else {
                return Err(Error::parse(line_no, format!("unrecognized line {trimmed:?}")));
            };

            match current.as_mut() {
                Some(section) => section.lines.push(line),
                None => document.preamble.push(line),
            }
        }

        if let Some(section) = current.take() {
            document.sections.push(section);
        }

        Ok(document)
    }

    /// Render the document to text. The output parses back to an
    /// equal document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            render_line(&mut out, line);
        }
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for line in &section.lines {
                render_line(&mut out, line);
            }
        }
        out
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Replace the body of `name` wholesale, or append a new section.
    ///
    /// Other sections are untouched. A newly appended section is
    /// separated from the previous one by a blank line.
    pub fn upsert_section(&mut self, name: &str, settings: &SettingsBlock) -> Result<()> {
        validate_section_name(name)?;

        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.set_settings(settings),
            None => {
                if let Some(last) = self.sections.last_mut() {
                    if !last.ends_with_blank() {
                        last.lines.push(Line::Blank);
                    }
                }
                let mut section = Section::new(name);
                section.set_settings(settings);
                self.sections.push(section);
            }
        }
        Ok(())
    }

    /// Remove a section. Returns whether it existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.sections.is_empty()
    }
}

fn render_line(out: &mut String, line: &Line) {
    match line {
        Line::Blank => out.push('\n'),
        Line::Comment(text) => {
            out.push_str(text);
            out.push('\n');
        }
        Line::Setting { key, value } => {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&quote_value(value));
            out.push('\n');
        }
    }
}

/// Check that a name can appear inside `[...]` on a single line.
pub fn validate_section_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.contains(['[', ']', '\n', '\r'])
        && name == name.trim();
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidSectionName {
            name: name.to_string(),
        })
    }
}

/// Render a value as `"..."` with `\` and `"` escaped.
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '\\' || c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Strip surrounding quotes and unescape, or take a bare value as-is.
fn unquote_value(raw: &str, line_no: usize) -> Result<String> {
    let Some(inner) = raw.strip_prefix('"') else {
        return Ok(raw.to_string());
    };
    let inner = inner
        .strip_suffix('"')
        .ok_or_else(|| Error::parse(line_no, "unterminated quoted value"))?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('\\' | '"')) => value.push(escaped),
                Some(other) => {
                    return Err(Error::parse(
                        line_no,
                        format!("invalid escape sequence \\{other}"),
                    ));
                }
                None => return Err(Error::parse(line_no, "dangling escape at end of value")),
            }
        } else if c == '"' {
            return Err(Error::parse(line_no, "unescaped quote inside value"));
        } else {
            value.push(c);
        }
    }
    Ok(value)
}
