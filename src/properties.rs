//! Rewriting of `gradle.properties`-style files.
//!
//! The parser keeps every physical line of the input, so a file whose recognized
//! keys are rewritten serializes back with comments, ordering, blank lines and line
//! endings intact. Only values of keys that are already present are replaced.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;

use crate::constants::property_keys;
use crate::error::{Error, Result};
use crate::request::GenerationRequest;
use crate::versions::Dependency;

/// A line of the file that could not be understood.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based physical line number where the offending entry starts.
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    fn new<S: Into<String>>(line: usize, reason: S) -> Self {
        Self { line, reason: reason.into() }
    }

    /// Attaches the file path, producing the crate-level error.
    pub fn at<P: AsRef<Path>>(self, path: P) -> Error {
        Error::UnparsableConfigFile {
            path: path.as_ref().to_path_buf(),
            line: self.line,
            reason: self.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank lines and comments, kept as written.
    Verbatim(String),
    Entry(Entry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    separator: String,
    value: String,
    ending: String,
    /// Original text including continuation lines and terminator.
    raw: String,
    modified: bool,
}

impl Entry {
    fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modified {
            return f.write_str(&self.raw);
        }
        let separator = if self.separator.is_empty() { "=" } else { self.separator.as_str() };
        write!(f, "{}{}{}{}", self.key, separator, self.value, self.ending)
    }
}

/// An ordered, lossless view of a properties file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    lines: Vec<Line>,
}

impl Properties {
    /// Parses properties text.
    ///
    /// # Errors
    /// * An entry without a key (a line starting with `=` or `:`)
    /// * A line continuation at the end of the input
    pub fn parse(content: &str) -> std::result::Result<Self, ParseError> {
        let mut lines = Vec::new();
        let mut physical = content.split_inclusive('\n').enumerate();

        while let Some((index, first)) = physical.next() {
            let line_no = index + 1;
            let (text, _) = split_ending(first);
            let trimmed = text.trim_start_matches(is_blank);

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                lines.push(Line::Verbatim(first.to_string()));
                continue;
            }

            let mut raw = first.to_string();
            let mut last = first;
            while continues(split_ending(last).0) {
                match physical.next() {
                    Some((_, next)) => {
                        raw.push_str(next);
                        last = next;
                    }
                    None => {
                        return Err(ParseError::new(line_no, "line continuation at end of file"))
                    }
                }
            }

            let (logical, ending) = split_ending(&raw);
            let entry = parse_entry(logical, ending, &raw).map_err(|r| ParseError::new(line_no, r))?;
            lines.push(Line::Entry(entry));
        }

        Ok(Self { lines })
    }

    /// Returns the raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries().find(|entry| entry.key == key).map(|entry| entry.value.as_str())
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|entry| entry.key.as_str())
    }

    /// Overwrites every entry named `key`. Absent keys are not created.
    ///
    /// Returns whether at least one entry was updated.
    pub fn set_existing(&mut self, key: &str, value: &str) -> bool {
        let mut found = false;
        for line in &mut self.lines {
            if let Line::Entry(entry) = line {
                if entry.key == key {
                    entry.value = value.to_string();
                    entry.modified = true;
                    found = true;
                }
            }
        }
        found
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Verbatim(_) => None,
        })
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Verbatim(text) => f.write_str(text)?,
                Line::Entry(entry) => entry.write_to(f)?,
            }
        }
        Ok(())
    }
}

/// Properties whitespace: space, tab and form feed.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn split_ending(line: &str) -> (&str, &str) {
    if let Some(text) = line.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = line.strip_suffix('\n') {
        (text, "\n")
    } else {
        (line, "")
    }
}

/// An odd number of trailing backslashes joins the next line.
fn continues(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn parse_entry(logical: &str, ending: &str, raw: &str) -> std::result::Result<Entry, String> {
    let body = logical.trim_start_matches(is_blank);

    let mut key_end = body.len();
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &body[..key_end];
    if key.is_empty() {
        return Err("entry has no key".to_string());
    }

    let rest = &body[key_end..];
    let after_blank = rest.trim_start_matches(is_blank);
    let mut separator_len = rest.len() - after_blank.len();
    if after_blank.starts_with(['=', ':']) {
        let after_sep = after_blank[1..].trim_start_matches(is_blank);
        separator_len = rest.len() - after_sep.len();
    }

    Ok(Entry {
        key: key.to_string(),
        separator: rest[..separator_len].to_string(),
        value: rest[separator_len..].to_string(),
        ending: ending.to_string(),
        raw: raw.to_string(),
        modified: false,
    })
}

/// Values written to the recognized keys, in the order they are applied.
pub fn property_values(request: &GenerationRequest) -> IndexMap<&'static str, String> {
    let mc_version = request.mc_version();
    let mut values = IndexMap::new();
    values.insert(property_keys::MAVEN_GROUP, request.package().to_string());
    values.insert(property_keys::MOD_ID, request.mod_id().to_string());
    values.insert(property_keys::MINECRAFT_VERSION, mc_version.as_str().to_string());
    values.insert(
        property_keys::VS2_VERSION,
        Dependency::ValkyrienSkies.version(mc_version).to_string(),
    );
    values.insert(property_keys::VS_CORE_VERSION, Dependency::VsCore.version(mc_version).to_string());
    values.insert(
        property_keys::ARCHITECTURY_VERSION,
        Dependency::ArchitecturyApi.version(mc_version).to_string(),
    );
    values.insert(
        property_keys::FABRIC_API_VERSION,
        Dependency::FabricApi.version(mc_version).to_string(),
    );
    values
}

/// Rewrites the recognized keys of `content`, returning the new text and how many
/// keys were present.
pub fn rewrite_properties(
    content: &str,
    request: &GenerationRequest,
) -> std::result::Result<(String, usize), ParseError> {
    let mut properties = Properties::parse(content)?;
    let mut rewritten = 0;
    for (key, value) in property_values(request) {
        if properties.set_existing(key, &value) {
            rewritten += 1;
        }
    }
    Ok((properties.to_string(), rewritten))
}

/// Rewrites a properties file in place.
///
/// # Errors
/// * `Error::UndecodableFile` if the file is not UTF-8
/// * `Error::UnparsableConfigFile` if it is not in properties format
pub fn rewrite_properties_file<P: AsRef<Path>>(path: P, request: &GenerationRequest) -> Result<usize> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|_| Error::UndecodableFile { path: path.to_path_buf() })?;

    let (output, rewritten) = rewrite_properties(&content, request).map_err(|e| e.at(path))?;
    debug!("Rewrote {} key(s) in {}", rewritten, path.display());

    if rewritten > 0 {
        fs::write(path, output)?;
    }
    Ok(rewritten)
}
