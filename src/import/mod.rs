//! Text record import
//!
//! Turns a delimited dataset into the ordered `TextRecord` sequence. The
//! parser itself never looks at header names; mapping columns onto
//! `uid`/`actor`/`text` happens here, driven by `ImportConfig`.
//!
//! ```text
//! raw text ──parse_table──▶ ImportTable ──text_records──▶ Vec<TextRecord>
//! ```

mod parser;

use serde::{Deserialize, Serialize};

use crate::model::TextRecord;

pub use parser::{
    detect_delimiter, parse_lenient, parse_strict, parse_table, split_fields, Delimiter,
    ImportError, ImportMode, ImportTable,
};

/// Delimiter choice from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterSetting {
    /// From the file extension, else detected from content
    #[default]
    Auto,
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl DelimiterSetting {
    pub fn resolve(self, content: &str, extension: Option<&str>) -> Delimiter {
        match self {
            DelimiterSetting::Auto => extension
                .and_then(Delimiter::from_extension)
                .unwrap_or_else(|| detect_delimiter(content)),
            DelimiterSetting::Comma => Delimiter::Comma,
            DelimiterSetting::Tab => Delimiter::Tab,
            DelimiterSetting::Pipe => Delimiter::Pipe,
            DelimiterSetting::Semicolon => Delimiter::Semicolon,
        }
    }
}

/// Import settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub mode: ImportMode,
    pub delimiter: DelimiterSetting,
    /// Header naming the unique identity column
    pub uid_field: String,
    pub actor_field: String,
    pub text_field: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            mode: ImportMode::Lenient,
            delimiter: DelimiterSetting::Auto,
            uid_field: "uid".to_string(),
            actor_field: "actor".to_string(),
            text_field: "text".to_string(),
        }
    }
}

/// Map table rows onto text records
///
/// Rows with a blank uid are skipped. Unknown columns are carried as
/// passthrough fields; a missing actor/text column yields empty strings.
pub fn text_records(
    table: &ImportTable,
    config: &ImportConfig,
) -> Result<Vec<TextRecord>, ImportError> {
    let uid_col = table.column_index(&config.uid_field).ok_or_else(|| {
        ImportError::new(format!("missing identity column '{}'", config.uid_field))
    })?;
    let actor_col = table.column_index(&config.actor_field);
    let text_col = table.column_index(&config.text_field);

    let records: Vec<TextRecord> = table
        .rows
        .iter()
        .filter(|row| !row[uid_col].trim().is_empty())
        .map(|row| {
            let field = |col: Option<usize>| col.map(|c| row[c].clone()).unwrap_or_default();
            let extra = table
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != uid_col && Some(*i) != actor_col && Some(*i) != text_col)
                .map(|(i, name)| (name.clone(), row[i].clone()))
                .collect();
            TextRecord {
                uid: row[uid_col].clone(),
                actor: field(actor_col),
                text: field(text_col),
                extra,
            }
        })
        .collect();

    if records.is_empty() {
        return Err(ImportError::new("no records after the header line"));
    }
    Ok(records)
}

/// Parse `content` and map it to text records in one step
pub fn import_texts(
    content: &str,
    extension: Option<&str>,
    config: &ImportConfig,
) -> Result<Vec<TextRecord>, ImportError> {
    let delimiter = config.delimiter.resolve(content, extension);
    let table = parse_table(content, delimiter, config.mode)?;
    tracing::debug!(
        ?delimiter,
        mode = ?config.mode,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "parsed import table"
    );
    text_records(&table, config)
}
