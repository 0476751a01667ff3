use super::error::RegexCompileError;
use crate::parser::{Field, Record};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Flags shared by every field pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    pub multiline: bool,
}

impl Default for RegexFlags {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            multiline: false,
        }
    }
}

impl RegexFlags {
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    pub fn multiline(mut self, value: bool) -> Self {
        self.multiline = value;
        self
    }
}

/// The pattern typed for each field; an empty pattern places no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldPatterns {
    pub date: String,
    #[serde(rename = "statuscode")]
    pub status_code: String,
    pub description: String,
    #[serde(rename = "iporigen")]
    pub origin_ip: String,
}

impl FieldPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, pattern: impl Into<String>) -> Self {
        self.set(field, pattern);
        self
    }

    pub fn set(&mut self, field: Field, pattern: impl Into<String>) {
        *self.get_mut(field) = pattern.into();
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::StatusCode => &self.status_code,
            Field::Description => &self.description,
            Field::OriginIp => &self.origin_ip,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date,
            Field::StatusCode => &mut self.status_code,
            Field::Description => &mut self.description,
            Field::OriginIp => &mut self.origin_ip,
        }
    }

    /// Fields whose pattern is not blank, in schema order
    pub fn active(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, pattern)| !pattern.trim().is_empty())
    }

    /// True when no field has a pattern
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// A compiled pattern bound to one field
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    field: Field,
    regex: Regex,
}

impl FieldMatcher {
    pub fn field(&self) -> Field {
        self.field
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern is found anywhere in the record's value for this field
    pub fn matches(&self, record: &Record) -> bool {
        self.regex.is_match(record.field(self.field))
    }
}

/// Outcome of compiling a full set of field patterns
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    pub matchers: Vec<FieldMatcher>,
    pub compile_errors: Vec<RegexCompileError>,
}

impl MatcherSet {
    pub fn has_errors(&self) -> bool {
        !self.compile_errors.is_empty()
    }

    /// Check a single record against every active matcher.
    ///
    /// A set with compile errors matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        !self.has_errors() && self.matchers.iter().all(|m| m.matches(record))
    }
}

/// Compile one matcher per non-blank pattern, collecting the failures
pub fn compile_matchers(patterns: &FieldPatterns, flags: RegexFlags) -> MatcherSet {
    let mut set = MatcherSet::default();

    for (field, pattern) in patterns.active() {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multiline)
            .build();

        match compiled {
            Ok(regex) => set.matchers.push(FieldMatcher { field, regex }),
            Err(err) => {
                log::warn!("pattern for {field} does not compile: {pattern:?}");
                set.compile_errors.push(RegexCompileError {
                    field,
                    message: err.to_string(),
                });
            }
        }
    }

    log::debug!(
        "compiled {} matcher(s), {} compile error(s)",
        set.matchers.len(),
        set.compile_errors.len()
    );

    set
}

/// Records that satisfy every active matcher, in their original order.
///
/// Returns nothing while any pattern failed to compile.
pub fn filter_records<'a>(records: &'a [Record], matchers: &MatcherSet) -> Vec<&'a Record> {
    if matchers.has_errors() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| matchers.matches(record))
        .collect()
}
