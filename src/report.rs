use crate::filter::{FieldPatterns, RegexFlags};
use crate::parser::{Field, FormatError, ParsedLog, Record, ValidationProfile};
use crate::session::FilterSession;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write;
use std::path::Path;

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

fn create_records_table<'a>(records: impl IntoIterator<Item = &'a Record>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Line", "Date", "Status", "IP origin", "Description"]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.line_number()),
            Cell::new(record.date()),
            Cell::new(record.status_code()),
            Cell::new(record.origin_ip()),
            Cell::new(record.description()),
        ]);
    }

    table
}

fn write_format_errors(out: &mut String, errors: &[FormatError]) {
    if errors.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", "Format errors".bold());
    for error in errors {
        let _ = writeln!(out, "  {}", error.message.yellow());
    }
}

fn describe_patterns(patterns: &FieldPatterns, flags: RegexFlags) -> String {
    let active: Vec<String> = patterns
        .active()
        .map(|(field, pattern)| format!("{field}={pattern}"))
        .collect();
    if active.is_empty() {
        return "none (all records shown)".to_string();
    }

    let mut modes = vec![if flags.case_insensitive {
        "case-insensitive"
    } else {
        "case-sensitive"
    }];
    if flags.multiline {
        modes.push("multiline");
    }
    format!("{} ({})", active.join(" "), modes.join(", "))
}

/// Text report for a validation-only run
pub fn format_check_text(file: &Path, parsed: &ParsedLog, profile: ValidationProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({profile} profile)",
        "CHECK".bold().bright_white(),
        file.display()
    );
    let _ = writeln!(
        out,
        "Lines read: {}  Records: {}  Format errors: {}",
        parsed.total_lines(),
        parsed.records.len().to_string().green().bold(),
        if parsed.is_clean() {
            "0".green().bold()
        } else {
            parsed.format_errors.len().to_string().red().bold()
        }
    );

    if parsed.is_clean() {
        let _ = writeln!(out, "{}", "All lines are well-formed.".green());
    } else {
        write_format_errors(&mut out, &parsed.format_errors);
    }

    out
}

pub fn format_check_json(file: &Path, parsed: &ParsedLog, profile: ValidationProfile) -> String {
    serde_json::to_string_pretty(&json!({
        "check": {
            "file": file.display().to_string(),
            "profile": profile,
            "total_lines": parsed.total_lines(),
            "records": parsed.records.len(),
            "format_errors": parsed.format_errors,
        }
    }))
    .unwrap_or_else(|_| "{\"check\":{\"error\":\"failed to serialize check output\"}}".into())
}

/// Text report listing the records that passed the current patterns
pub fn format_filter_text(session: &FilterSession, show_errors: bool) -> String {
    let summary = session.summary();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} matched {} of {}",
        "FILTER".bold().bright_white(),
        summary.matches.to_string().green().bold(),
        plural(summary.total_records, "record", "records")
    );
    let _ = writeln!(
        out,
        "Patterns: {}",
        describe_patterns(session.patterns(), session.flags())
    );

    if !session.compile_errors().is_empty() {
        let _ = writeln!(out, "\n{}", "Invalid patterns".red().bold());
        for error in session.compile_errors() {
            let _ = writeln!(out, "  {}:", error.field.to_string().red());
            for line in error.message.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        let _ = writeln!(
            out,
            "{}",
            "No records are shown while a pattern is invalid.".yellow()
        );
    }

    let filtered = session.filtered();
    if filtered.is_empty() {
        let _ = writeln!(out, "\nNo matching records.");
    } else {
        let _ = writeln!(out, "\n{}", create_records_table(filtered));
    }

    if show_errors {
        write_format_errors(&mut out, session.format_errors());
    } else if !session.format_errors().is_empty() {
        let _ = writeln!(
            out,
            "\n{} skipped by validation (use --show-errors to list them)",
            plural(session.format_errors().len(), "line", "lines")
        );
    }

    out
}

pub fn format_filter_json(file: &Path, session: &FilterSession, show_errors: bool) -> String {
    let patterns: serde_json::Map<String, serde_json::Value> = Field::ALL
        .into_iter()
        .map(|field| {
            (
                field.canonical_name().to_string(),
                json!(session.patterns().get(field)),
            )
        })
        .collect();
    let summary = session.summary();

    serde_json::to_string_pretty(&json!({
        "filter": {
            "file": file.display().to_string(),
            "profile": session.profile(),
            "flags": session.flags(),
            "patterns": patterns,
            "total_records": summary.total_records,
            "matches": summary.matches,
            "compile_errors": session.compile_errors(),
            "records": session.filtered(),
            "format_error_count": summary.format_errors,
            "format_errors": show_errors.then(|| session.format_errors()),
        }
    }))
    .unwrap_or_else(|_| "{\"filter\":{\"error\":\"failed to serialize filter output\"}}".into())
}
