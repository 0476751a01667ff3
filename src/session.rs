//! Latest-input state for an interactive filtering session.
//!
//! Holds the parsed file plus the current patterns and flags, and derives the
//! compiled matchers and filtered rows from them. Matchers are recompiled only
//! when the patterns or flags differ from the ones they were built for.

use crate::filter::{
    FieldPatterns, MatcherSet, RegexCompileError, RegexFlags, compile_matchers, filter_records,
};
use crate::parser::{Field, FormatError, ParsedLog, Record, ValidationProfile, parse_log_text};

/// Counts describing the current state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub total_records: usize,
    pub format_errors: usize,
    pub compile_errors: usize,
    pub matches: usize,
}

pub struct FilterSession {
    profile: ValidationProfile,
    parsed: ParsedLog,
    patterns: FieldPatterns,
    flags: RegexFlags,
    matchers: MatcherSet,

    /// Inputs the current `matchers` were compiled for
    compiled_for_patterns: FieldPatterns,
    compiled_for_flags: RegexFlags,
}

impl FilterSession {
    /// Create an empty session with no file loaded and no patterns.
    pub fn new(profile: ValidationProfile, flags: RegexFlags) -> Self {
        Self {
            profile,
            parsed: ParsedLog::default(),
            patterns: FieldPatterns::new(),
            flags,
            matchers: MatcherSet::default(),
            compiled_for_patterns: FieldPatterns::new(),
            compiled_for_flags: flags,
        }
    }

    pub fn profile(&self) -> ValidationProfile {
        self.profile
    }

    /// Replace the loaded file; previous records and errors are dropped.
    pub fn load_text(&mut self, text: &str) {
        self.parsed = parse_log_text(text, self.profile);
        log::trace!(
            "session loaded {} record(s), {} format error(s)",
            self.parsed.records.len(),
            self.parsed.format_errors.len()
        );
    }

    pub fn set_pattern(&mut self, field: Field, pattern: impl Into<String>) {
        self.patterns.set(field, pattern);
        self.refresh_matchers();
    }

    pub fn set_patterns(&mut self, patterns: FieldPatterns) {
        self.patterns = patterns;
        self.refresh_matchers();
    }

    pub fn set_flags(&mut self, flags: RegexFlags) {
        self.flags = flags;
        self.refresh_matchers();
    }

    pub fn patterns(&self) -> &FieldPatterns {
        &self.patterns
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    pub fn parsed(&self) -> &ParsedLog {
        &self.parsed
    }

    pub fn records(&self) -> &[Record] {
        &self.parsed.records
    }

    pub fn format_errors(&self) -> &[FormatError] {
        &self.parsed.format_errors
    }

    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    pub fn compile_errors(&self) -> &[RegexCompileError] {
        &self.matchers.compile_errors
    }

    /// Records passing the current matchers, in file order.
    pub fn filtered(&self) -> Vec<&Record> {
        filter_records(&self.parsed.records, &self.matchers)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_records: self.parsed.records.len(),
            format_errors: self.parsed.format_errors.len(),
            compile_errors: self.matchers.compile_errors.len(),
            matches: self.filtered().len(),
        }
    }

    fn refresh_matchers(&mut self) {
        if self.patterns == self.compiled_for_patterns && self.flags == self.compiled_for_flags {
            return;
        }

        log::trace!("recompiling matchers for {:?}", self.patterns);
        self.matchers = compile_matchers(&self.patterns, self.flags);
        self.compiled_for_patterns = self.patterns.clone();
        self.compiled_for_flags = self.flags;
    }
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new(ValidationProfile::default(), RegexFlags::default())
    }
}
