//! Entry parsing
//!
//! Input files are "CSV-like": each record starts on a line beginning with a
//! seven digit id followed by a comma, and the text field may span several lines
//! or contain commas of its own. Records are therefore located by that line
//! prefix instead of by a CSV reader.

use std::sync::OnceLock;

use regex::{Matches, Regex};
use serde::Serialize;

use crate::{Error, Result};

/// Newline that opens a new record. The regex crate has no lookahead, so the
/// digits are matched and then handed back to the following segment.
const BOUNDARY_PATTERN: &str = r"\n\d{7},";

fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BOUNDARY_PATTERN).expect("boundary pattern is valid"))
}

/// One record extracted from an input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: String,
    pub source: String,
    pub text: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Lazy iterator over the raw segments of a file
pub struct Segments<'a> {
    content: &'a str,
    boundaries: Matches<'static, 'a>,
    next_start: Option<usize>,
}

impl<'a> Segments<'a> {
    pub fn new(content: &'a str) -> Self {
        let content = content.trim();
        // blank content has no segments at all, not one empty invalid segment
        let next_start = if content.is_empty() { None } else { Some(0) };
        Self {
            content,
            boundaries: boundary_regex().find_iter(content),
            next_start,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        match self.boundaries.next() {
            Some(boundary) => {
                // skip the newline, keep the id
                self.next_start = Some(boundary.start() + 1);
                Some(&self.content[start..boundary.start()])
            }
            None => {
                self.next_start = None;
                Some(&self.content[start..])
            }
        }
    }
}

/// Split one segment into `id`, `source` and `text`.
///
/// Only the first two commas separate fields; anything after them belongs to the
/// text. Fails with [`Error::InvalidEntry`] when fewer than three fields exist.
pub fn parse_segment(segment: &str) -> Result<Entry> {
    let mut parts = segment.splitn(3, ',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(source), Some(text)) => Ok(Entry {
            id: id.trim().to_string(),
            source: unquote(source.trim()).to_string(),
            text: unquote(text.trim()).to_string(),
        }),
        _ => Err(Error::InvalidEntry(segment.to_string())),
    }
}

/// Parse every segment of `content`, yielding one result per segment in file order.
pub fn parse_entries(content: &str) -> impl Iterator<Item = Result<Entry>> + '_ {
    Segments::new(content).map(parse_segment)
}

/// Drop one leading and one trailing double quote, without unescaping.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
