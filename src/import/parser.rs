//! Delimited text parsing
//!
//! Two modes:
//! - `Lenient`: quote state toggles on every `"`, a delimiter inside quotes is
//!   literal, and a quote-wrapped field loses exactly its outer quotes. Never
//!   fails.
//! - `Rfc4180`: strict parsing via the csv crate (doubled-quote unescaping,
//!   quoted newlines).

use serde::{Deserialize, Serialize};
use std::io::Cursor;

const QUOTE: char = '"';

/// Error type for delimited-text import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub message: String,
    pub line: Option<usize>,
}

impl ImportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "import error at line {}: {}", line, self.message),
            None => write!(f, "import error: {}", self.message),
        }
    }
}

impl std::error::Error for ImportError {}

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter implied by a file extension, if any
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Parsing strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Lenient,
    Rfc4180,
}

/// Header plus data rows, every row exactly as wide as the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ImportTable {
    fn from_records(mut records: impl Iterator<Item = Vec<String>>) -> Self {
        let Some(headers) = records.next() else {
            return Self::default();
        };
        let width = headers.len();
        let rows = records
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Position of a header by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split one line into fields with toggle-style quote tracking
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == delimiter && !in_quotes {
            fields.push(strip_outer_quotes(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(strip_outer_quotes(&current));

    fields
}

/// Remove exactly one leading and one trailing quote when both are present
fn strip_outer_quotes(field: &str) -> String {
    field
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .unwrap_or(field)
        .to_string()
}

/// Best-effort parse; the first line is the header, blank lines are skipped
pub fn parse_lenient(content: &str, delimiter: Delimiter) -> ImportTable {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.is_empty() {
        return ImportTable::default();
    }

    let mut lines = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let header = lines.next().map(|h| split_fields(h, delimiter.char()));
    let records = header.into_iter().chain(
        lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| split_fields(line, delimiter.char())),
    );

    ImportTable::from_records(records)
}

/// RFC 4180 parse using the csv crate
pub fn parse_strict(content: &str, delimiter: Delimiter) -> Result<ImportTable, ImportError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let cursor = Cursor::new(content.as_bytes());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut records: Vec<Vec<String>> = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if records.is_empty() || record.iter().any(|f| !f.trim().is_empty()) {
                    records.push(record.iter().map(|s| s.to_string()).collect());
                }
            }
            Err(e) => {
                return Err(ImportError {
                    message: e.to_string(),
                    line: Some(line_num + 1),
                });
            }
        }
    }

    Ok(ImportTable::from_records(records.into_iter()))
}

/// Parse with the given mode
pub fn parse_table(
    content: &str,
    delimiter: Delimiter,
    mode: ImportMode,
) -> Result<ImportTable, ImportError> {
    match mode {
        ImportMode::Lenient => Ok(parse_lenient(content, delimiter)),
        ImportMode::Rfc4180 => parse_strict(content, delimiter),
    }
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}
