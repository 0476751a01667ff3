use std::fs;
use std::path::Path;
use thiserror::Error;

mod entities;
mod rules;

pub use entities::{Field, FormatError, FormatErrorKind, ParsedLog, Record, UnknownField};
pub use rules::ValidationProfile;

/// Separator between the fields of a log line
pub const FIELD_DELIMITER: char = ';';

/// Number of fields every log line must have
pub const EXPECTED_FIELDS: usize = Field::ALL.len();

/// Errors raised while reading a log file from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read log file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Log file '{path}' is not valid UTF-8 text")]
    NotUtf8 { path: String },
}

/// Byte order mark some editors put at the start of UTF-8 files
const UTF8_BOM: char = '\u{FEFF}';

/// Reads the whole content of a log file as text, minus a leading byte order mark
pub fn load_log_file(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    let path_display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path_display.clone(),
        source,
    })?;

    let mut text =
        String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 { path: path_display })?;
    if text.starts_with(UTF8_BOM) {
        text.drain(..UTF8_BOM.len_utf8());
    }
    Ok(text)
}

/// Reads and parses a log file with the given validation profile
pub fn parse_log_file(
    path: impl AsRef<Path>,
    profile: ValidationProfile,
) -> Result<ParsedLog, LoadError> {
    let text = load_log_file(path)?;
    Ok(parse_log_text(&text, profile))
}

/// Parses the full text of a log file using the strict profile
pub fn parse_log_text_strict(text: &str) -> ParsedLog {
    parse_log_text(text, ValidationProfile::Strict)
}

/// Parses the full text of a log file into records and per-line format errors.
///
/// Blank lines are skipped and do not take a line number. Every other line ends
/// up in exactly one of the two output lists, both in file order.
pub fn parse_log_text(text: &str, profile: ValidationProfile) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    let normalized = text.replace("\r\n", "\n");
    let lines = normalized.split('\n').filter(|line| !line.trim().is_empty());

    for (index, line) in lines.enumerate() {
        match parse_log_line(line, index + 1, profile) {
            Ok(record) => parsed.records.push(record),
            Err(error) => parsed.format_errors.push(error),
        }
    }

    log::debug!(
        "parsed {} line(s) with {} profile: {} record(s), {} format error(s)",
        parsed.total_lines(),
        profile,
        parsed.records.len(),
        parsed.format_errors.len()
    );

    parsed
}

/// Parses a single non-blank line into a record.
///
/// Only the first problem found on the line is reported.
pub fn parse_log_line(
    line: &str,
    line_number: usize,
    profile: ValidationProfile,
) -> Result<Record, FormatError> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if parts.len() != EXPECTED_FIELDS {
        return Err(FormatError {
            line_number,
            kind: FormatErrorKind::FieldCount { found: parts.len() },
            message: format!(
                "Line {line_number}: invalid format (expected {EXPECTED_FIELDS} fields separated by '{FIELD_DELIMITER}', found {}).",
                parts.len()
            ),
        });
    }

    let mut values: [String; EXPECTED_FIELDS] = Default::default();
    for field in Field::ALL {
        let raw = parts[field.index()];
        values[field.index()] = profile.validate(field, raw).ok_or_else(|| FormatError {
            line_number,
            kind: FormatErrorKind::InvalidField { field },
            message: format!(
                "Line {line_number}: invalid {field} ({}).",
                profile.expected_shape(field)
            ),
        })?;
    }

    Ok(Record::new(line.to_string(), values, line_number))
}
