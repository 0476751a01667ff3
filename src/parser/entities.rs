use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four columns of a log line, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Date the line was logged (e.g., "2025-08-01")
    Date,
    /// HTTP-like status code (e.g., "200")
    #[serde(rename = "statuscode")]
    StatusCode,
    /// Free text description of the event
    Description,
    /// IPv4 address the request came from
    #[serde(rename = "iporigen")]
    OriginIp,
}

impl Field {
    /// All fields in the order they appear on a line
    pub const ALL: [Field; 4] = [
        Field::Date,
        Field::StatusCode,
        Field::Description,
        Field::OriginIp,
    ];

    /// Get the canonical name of this field
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::StatusCode => "statuscode",
            Field::Description => "description",
            Field::OriginIp => "iporigen",
        }
    }

    /// Position of this field on the line (0-indexed)
    pub fn index(&self) -> usize {
        match self {
            Field::Date => 0,
            Field::StatusCode => 1,
            Field::Description => 2,
            Field::OriginIp => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Error returned when a string does not name a known field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" | "fecha" => Ok(Field::Date),
            "statuscode" | "status" | "code" => Ok(Field::StatusCode),
            "description" | "desc" | "descripcion" => Ok(Field::Description),
            "iporigen" | "ip" | "origin" => Ok(Field::OriginIp),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// A log line that passed every field validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    raw_text: String,
    date: String,
    status_code: String,
    description: String,
    origin_ip: String,
    line_number: usize,
}

impl Record {
    pub(crate) fn new(
        raw_text: String,
        [date, status_code, description, origin_ip]: [String; 4],
        line_number: usize,
    ) -> Self {
        Self {
            raw_text,
            date,
            status_code,
            description,
            origin_ip,
            line_number,
        }
    }

    /// The original, unaltered log line
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Description with the surrounding quotes already removed (strict profile)
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn origin_ip(&self) -> &str {
        &self.origin_ip
    }

    /// Position among the non-blank lines of the source file (1-indexed)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get the value of a field regardless of which one it is
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::StatusCode => &self.status_code,
            Field::Description => &self.description,
            Field::OriginIp => &self.origin_ip,
        }
    }
}

/// What made a line unusable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormatErrorKind {
    /// The line did not split into exactly four fields
    FieldCount { found: usize },
    /// A field did not have the expected shape
    InvalidField { field: Field },
}

/// A line that was rejected, with a message ready to show to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatError {
    pub line_number: usize,
    pub kind: FormatErrorKind,
    pub message: String,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of parsing a whole file: valid records and rejected lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLog {
    pub records: Vec<Record>,
    pub format_errors: Vec<FormatError>,
}

impl ParsedLog {
    /// Number of non-blank lines that were examined
    pub fn total_lines(&self) -> usize {
        self.records.len() + self.format_errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.format_errors.is_empty()
    }
}
