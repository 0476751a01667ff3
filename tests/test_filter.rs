use log_regex_filter::filter::{FieldPatterns, RegexFlags, compile_matchers, filter_records};
use log_regex_filter::parser::{Field, Record, parse_log_text_strict};

fn sample_records() -> Vec<Record> {
    let text = [
        "2025-08-01;200;\"Request OK\";192.168.1.10",
        "2025-08-01;301;\"moved permanently\";192.168.1.11",
        "2025-08-02;404;\"not found\";10.0.0.7",
        "2025-08-03;500;\"upstream timeout\";10.0.0.8",
    ]
    .join("\n");
    let parsed = parse_log_text_strict(&text);
    assert!(parsed.is_clean(), "fixture must parse: {:?}", parsed.format_errors);
    parsed.records
}

fn lines(records: &[&Record]) -> Vec<usize> {
    records.iter().map(|r| r.line_number()).collect()
}

#[test]
fn test_status_alternation_keeps_only_matching_codes() {
    let records = sample_records();
    let patterns = FieldPatterns::new().with(Field::StatusCode, "^(200|404)$");
    let matchers = compile_matchers(&patterns, RegexFlags::default());

    let filtered = filter_records(&records, &matchers);
    let codes: Vec<&str> = filtered.iter().map(|r| r.status_code()).collect();
    assert_eq!(codes, vec!["200", "404"]);
}

#[test]
fn test_invalid_pattern_fails_closed() {
    let records = sample_records();
    let patterns = FieldPatterns::new()
        .with(Field::OriginIp, "[")
        .with(Field::StatusCode, "^2");
    let matchers = compile_matchers(&patterns, RegexFlags::default());

    assert_eq!(matchers.compile_errors.len(), 1);
    assert_eq!(matchers.compile_errors[0].field, Field::OriginIp);
    assert!(!matchers.compile_errors[0].message.is_empty());
    assert_eq!(matchers.matchers.len(), 1, "valid patterns still compile");
    assert!(
        filter_records(&records, &matchers).is_empty(),
        "no rows may be shown while a pattern is broken"
    );
}

#[test]
fn test_compile_error_carries_regex_diagnostic_verbatim() {
    let patterns = FieldPatterns::new().with(Field::Date, "(unclosed");
    let matchers = compile_matchers(&patterns, RegexFlags::default());

    let expected = regex::RegexBuilder::new("(unclosed")
        .case_insensitive(true)
        .build()
        .expect_err("pattern is invalid")
        .to_string();
    assert_eq!(matchers.compile_errors[0].message, expected);
    assert!(expected.contains("unclosed group"));
}

#[test]
fn test_empty_patterns_keep_every_record() {
    let records = sample_records();
    let blank = FieldPatterns::new()
        .with(Field::Date, "")
        .with(Field::Description, "  ");
    let matchers = compile_matchers(&blank, RegexFlags::default());

    assert!(matchers.matchers.is_empty());
    assert!(matchers.compile_errors.is_empty());
    let filtered = filter_records(&records, &matchers);
    assert_eq!(filtered.len(), records.len());
    assert_eq!(lines(&filtered), vec![1, 2, 3, 4]);
}

#[test]
fn test_fields_combine_with_and() {
    let records = sample_records();
    let patterns = FieldPatterns::new()
        .with(Field::OriginIp, "^10\\.")
        .with(Field::Description, "time");
    let matchers = compile_matchers(&patterns, RegexFlags::default());

    let filtered = filter_records(&records, &matchers);
    assert_eq!(lines(&filtered), vec![4]);

    for record in &records {
        let expected = matchers.matchers.iter().all(|m| m.matches(record));
        assert_eq!(
            filtered.iter().any(|r| r.line_number() == record.line_number()),
            expected,
            "record on line {} breaks the conjunction law",
            record.line_number()
        );
    }
}

#[test]
fn test_matching_is_unanchored_search() {
    let records = sample_records();
    let patterns = FieldPatterns::new().with(Field::OriginIp, "168");
    let matchers = compile_matchers(&patterns, RegexFlags::default());
    assert_eq!(lines(&filter_records(&records, &matchers)), vec![1, 2]);

    let anchored = FieldPatterns::new().with(Field::OriginIp, "^168");
    let matchers = compile_matchers(&anchored, RegexFlags::default());
    assert!(filter_records(&records, &matchers).is_empty());
}

#[test]
fn test_case_insensitive_by_default() {
    let records = sample_records();
    let patterns = FieldPatterns::new().with(Field::Description, "request ok");

    let matchers = compile_matchers(&patterns, RegexFlags::default());
    assert_eq!(lines(&filter_records(&records, &matchers)), vec![1]);

    let sensitive = RegexFlags::default().case_insensitive(false);
    let matchers = compile_matchers(&patterns, sensitive);
    assert!(filter_records(&records, &matchers).is_empty());
}

#[test]
fn test_multiline_flag_keeps_single_line_anchors_working() {
    let records = sample_records();
    let patterns = FieldPatterns::new().with(Field::StatusCode, "^404$");

    let matchers = compile_matchers(&patterns, RegexFlags::default().multiline(true));
    assert!(matchers.compile_errors.is_empty());
    assert_eq!(lines(&filter_records(&records, &matchers)), vec![3]);
}
