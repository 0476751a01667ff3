use super::error::FilterParseError;
use super::matcher::FieldPatterns;
use crate::parser::Field;

/// A single filter term (e.g., "status:^2" or "ip:\"^10\\.0 \"")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    /// The field the pattern applies to
    pub field: Field,
    /// The regular expression, with surrounding quotes removed
    pub pattern: String,
}

impl FilterTerm {
    /// Parse a single filter term from a string
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let Some((name, rest)) = s.split_once(':') else {
            return Err(FilterParseError::InvalidExpression(format!(
                "Expected 'field:pattern' format, got: {s}"
            )));
        };

        let field: Field = name
            .trim()
            .parse()
            .map_err(|_| FilterParseError::UnknownField(name.trim().to_string()))?;
        let pattern = unquote(rest.trim()).to_string();

        if pattern.is_empty() {
            return Err(FilterParseError::EmptyPattern(field));
        }

        Ok(FilterTerm { field, pattern })
    }
}

/// A complete filter expression, at most one term per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    /// All filter terms (combined with AND logic)
    pub terms: Vec<FilterTerm>,
}

impl FilterExpression {
    /// Create a new empty filter expression
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Parse a filter expression from a string
    ///
    /// Terms are separated by whitespace outside of double quotes.
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let mut terms: Vec<FilterTerm> = Vec::new();

        for part in split_preserving_quotes(s) {
            let term = FilterTerm::parse(part)?;
            if terms.iter().any(|t| t.field == term.field) {
                return Err(FilterParseError::DuplicateField(term.field));
            }
            terms.push(term);
        }

        Ok(FilterExpression { terms })
    }

    /// Check if this expression is empty (no filters)
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Pattern given for a field, if any
    pub fn pattern_for(&self, field: Field) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.field == field)
            .map(|t| t.pattern.as_str())
    }

    /// Convert into one pattern per field; missing fields stay empty
    pub fn into_patterns(self) -> FieldPatterns {
        self.terms
            .into_iter()
            .fold(FieldPatterns::new(), |patterns, term| {
                patterns.with(term.field, term.pattern)
            })
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Split a string by whitespace while preserving quoted segments
fn split_preserving_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if i > start {
                    let part = s[start..i].trim();
                    if !part.is_empty() {
                        parts.push(part);
                    }
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        let part = s[start..].trim();
        if !part.is_empty() {
            parts.push(part);
        }
    }

    parts
}
