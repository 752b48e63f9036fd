//! Loading grids from delimited text using the csv crate

use std::fmt;
use std::io::Cursor;

use super::model::GridData;

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter implied by a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Error returned when grid content cannot be parsed
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub record: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(record) => write!(f, "grid parse error at record {}: {}", record, self.message),
            None => write!(f, "grid parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse delimited content into grid rows
///
/// Every record becomes a row; there is no header handling.
pub fn parse_csv(content: &str, delimiter: Delimiter) -> Result<GridData, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ParseError {
            message: e.to_string(),
            record: Some(idx + 1),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(GridData::from_rows(rows))
}

/// Guess the delimiter from the first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let head: Vec<&str> = content.lines().take(5).collect();
    let count = |c: char| head.iter().map(|l| l.matches(c).count()).sum::<usize>();

    [
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::Semicolon,
        Delimiter::Comma,
    ]
    .into_iter()
    .map(|d| (count(d.char()), d))
    .filter(|(n, _)| *n > 0)
    .max_by(|a, b| a.0.cmp(&b.0).then(b.1.priority().cmp(&a.1.priority())))
    .map(|(_, d)| d)
    .unwrap_or_default()
}

impl Delimiter {
    // Lower wins on ties.
    fn priority(self) -> u8 {
        match self {
            Delimiter::Tab => 0,
            Delimiter::Pipe => 1,
            Delimiter::Semicolon => 2,
            Delimiter::Comma => 3,
        }
    }
}
