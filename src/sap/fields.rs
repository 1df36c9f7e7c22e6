//! Field extraction from a SAP header segment.
//!
//! The header is a positional block of CR LF separated lines:
//!
//! ```text
//! SAP
//! AUTHOR "author"
//! NAME "name"
//! DATE "date"
//! ...
//! ```
//!
//! Values are taken from the first ` "` of a line up to the next ` "`, with
//! every quote removed. Lines after the date (TYPE, SONGS, STEREO, ...) are not
//! positional; only the `STEREO` marker is looked up, anywhere in the header.

use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memmem;
use regex::bytes::Regex;
use tracing::debug;

use super::document::{DocumentSchema, SapDocument};
use super::error::{HeaderError, Result};

const LINE_SEPARATOR: &[u8] = b"\r\n";
const VALUE_DELIMITER: &[u8] = b" \"";
const STEREO_MARKER: &[u8] = b"STEREO";

const AUTHOR_LINE: usize = 1;
const NAME_LINE: usize = 2;
const DATE_LINE: usize = 3;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[1-9][0-9]{2}[0-9?]").unwrap());

/// How malformed headers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Missing lines or values become empty fields.
    Lenient,
    /// Missing lines or values fail the whole file.
    #[default]
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldParser {
    schema: DocumentSchema,
    mode: ParseMode,
}

impl FieldParser {
    pub fn new(schema: DocumentSchema, mode: ParseMode) -> Self {
        Self { schema, mode }
    }

    pub fn schema(&self) -> DocumentSchema {
        self.schema
    }

    /// Build a document from a header segment (see [`super::header::split_header`]).
    pub fn parse(&self, header: &[u8]) -> Result<SapDocument> {
        let lines = split_lines(header);

        let author = self.settle(
            quoted_value(&lines, AUTHOR_LINE, "AUTHOR").map(|v| strip_quotes(v).into_owned()),
        )?;
        let name = self.settle(
            quoted_value(&lines, NAME_LINE, "NAME").map(|v| strip_quotes(v).into_owned()),
        )?;
        let date = self.settle(quoted_value(&lines, DATE_LINE, "DATE").map(find_year))?;

        let stereo = self
            .schema
            .has_stereo()
            .then(|| memmem::find(header, STEREO_MARKER).is_some());

        Ok(SapDocument {
            author,
            name,
            date,
            stereo,
        })
    }

    fn settle(&self, value: Result<String>) -> Result<String> {
        match (value, self.mode) {
            (Ok(value), _) => Ok(value),
            (Err(err), ParseMode::Lenient) => {
                debug!("using empty value: {}", err);
                Ok(String::new())
            }
            (Err(err), ParseMode::Strict) => Err(err),
        }
    }
}

/// Split on CR LF. A trailing separator produces a trailing empty line.
pub fn split_lines(header: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut rest = header;
    while let Some(end) = memmem::find(rest, LINE_SEPARATOR) {
        lines.push(&rest[..end]);
        rest = &rest[end + LINE_SEPARATOR.len()..];
    }
    lines.push(rest);
    lines
}

/// The segment between the first ` "` of a line and the next one.
fn quoted_value<'a>(lines: &[&'a [u8]], line: usize, field: &'static str) -> Result<&'a [u8]> {
    let text: &'a [u8] = lines.get(line).copied().ok_or(HeaderError::MissingLine {
        field,
        line,
        found: lines.len(),
    })?;

    let start = memmem::find(text, VALUE_DELIMITER)
        .map(|pos| pos + VALUE_DELIMITER.len())
        .ok_or(HeaderError::MissingDelimiter { field })?;
    let rest = &text[start..];
    let end = memmem::find(rest, VALUE_DELIMITER).unwrap_or(rest.len());
    Ok(&rest[..end])
}

fn strip_quotes(value: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(value) {
        Cow::Borrowed(s) if !s.contains('"') => Cow::Borrowed(s),
        s => Cow::Owned(s.replace('"', "")),
    }
}

/// First year-looking token of a date value, or empty.
pub fn find_year(value: &[u8]) -> String {
    YEAR_RE
        .find(value)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .unwrap_or_default()
}
