use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_log-regex-filter")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LOG_REGEX_FILTER_CONFIG")
        .output()
        .expect("command should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const SAMPLE: &str = "\
2025-08-01;200;\"request ok\";192.168.1.10
2025-08-01;301;\"moved\";192.168.1.11
bad-line
2025-08-02;404;\"not found\";10.0.0.7
2025-13-40;999;nope;999.0.0.1
";

#[test]
fn test_check_lists_format_errors() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&["check", file.to_str().expect("utf8 path")]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = stdout(&output);
    assert!(text.contains("Records: 3"), "got:\n{text}");
    assert!(text.contains("Line 3: invalid format"), "got:\n{text}");
    assert!(text.contains("Line 5: invalid date"), "got:\n{text}");
}

#[test]
fn test_check_json_output() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&["-F", "json", "check", file.to_str().expect("utf8 path")]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("check output should be JSON");
    assert_eq!(value["check"]["records"], 3);
    assert_eq!(value["check"]["total_lines"], 5);
    assert_eq!(value["check"]["profile"], "strict");
    let errors = value["check"]["format_errors"]
        .as_array()
        .expect("format errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["line_number"], 3);
    assert_eq!(errors[0]["kind"]["type"], "field_count");
    assert_eq!(errors[1]["kind"]["field"], "date");
}

#[test]
fn test_filter_by_status_code() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&[
        "-F",
        "json",
        "filter",
        file.to_str().expect("utf8 path"),
        "--status",
        "^(200|404)$",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("filter output should be JSON");
    let codes: Vec<&str> = value["filter"]["records"]
        .as_array()
        .expect("records array")
        .iter()
        .filter_map(|r| r["status_code"].as_str())
        .collect();
    assert_eq!(codes, vec!["200", "404"]);
    assert_eq!(value["filter"]["patterns"]["statuscode"], "^(200|404)$");
    assert_eq!(value["filter"]["flags"]["case_insensitive"], true);
}

#[test]
fn test_filter_expression_and_field_option_combine() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&[
        "-F",
        "json",
        "filter",
        file.to_str().expect("utf8 path"),
        "--filter",
        "ip:^192 status:^4",
        "--status",
        "^3",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("filter output should be JSON");
    assert_eq!(value["filter"]["matches"], 1);
    assert_eq!(value["filter"]["records"][0]["status_code"], "301");
}

#[test]
fn test_invalid_pattern_reports_error_and_shows_nothing() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&[
        "filter",
        file.to_str().expect("utf8 path"),
        "--ip",
        "[",
        "--status",
        "^2",
    ]);
    assert!(
        output.status.success(),
        "a broken pattern is reported, not fatal"
    );

    let text = stdout(&output);
    assert!(text.contains("Invalid patterns"), "got:\n{text}");
    assert!(text.contains("iporigen"), "got:\n{text}");
    assert!(text.contains("No matching records."), "got:\n{text}");
}

#[test]
fn test_text_output_file_has_no_ansi_codes() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    let out = dir.path().join("report.txt");
    write_file(&file, SAMPLE);

    let output = Command::new(bin())
        .args([
            "--color",
            "always",
            "-o",
            out.to_str().expect("utf8 path"),
            "filter",
            file.to_str().expect("utf8 path"),
            "--description",
            "found",
        ])
        .output()
        .expect("command should run");
    assert!(output.status.success());

    let written = fs::read_to_string(&out).expect("output file should exist");
    assert!(written.contains("FILTER matched 1 of 3 records"), "got:\n{written}");
    assert!(!written.contains('\u{1b}'), "file output must be plain text");
}

#[test]
fn test_lenient_config_accepts_unquoted_descriptions() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    let config = dir.path().join("filter.toml");
    write_file(&file, "2025-08-01;200;request ok;192.168.120.100\n");
    write_file(&config, "[validation]\nprofile = \"lenient\"\n");

    let output = run(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "-F",
        "json",
        "check",
        file.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("check output should be JSON");
    assert_eq!(value["check"]["records"], 1);
    assert_eq!(value["check"]["profile"], "lenient");
}

#[test]
fn test_missing_file_fails_with_message() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.txt");

    let output = run(&["check", missing.to_str().expect("utf8 path")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read log file"), "stderr: {stderr}");
}

#[test]
fn test_bad_filter_expression_fails() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = run(&[
        "filter",
        file.to_str().expect("utf8 path"),
        "--filter",
        "level:ERROR",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid filter expression"), "stderr: {stderr}");
    assert!(stderr.contains("Unknown field"), "stderr: {stderr}");
}

#[test]
fn test_config_falls_back_to_builtin_template() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, "2025-08-01;600;request ok;192.168.120.100\n");

    let output = Command::new(bin())
        .current_dir(dir.path())
        .args(["--config", "lenient", "-F", "json", "check"])
        .arg(&file)
        .env_remove("RUST_LOG")
        .env_remove("LOG_REGEX_FILTER_CONFIG")
        .output()
        .expect("command should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("check output should be JSON");
    assert_eq!(value["check"]["profile"], "lenient");
    assert_eq!(value["check"]["records"], 1);
}

#[test]
fn test_unknown_config_name_lists_builtins() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("access.txt");
    write_file(&file, SAMPLE);

    let output = Command::new(bin())
        .current_dir(dir.path())
        .args(["--config", "paranoid", "check"])
        .arg(&file)
        .env_remove("LOG_REGEX_FILTER_CONFIG")
        .output()
        .expect("command should run");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'paranoid' not found"), "stderr: {stderr}");
    assert!(stderr.contains("strict, lenient"), "stderr: {stderr}");
}

#[test]
fn test_file_with_byte_order_mark_parses_first_line() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("windows.txt");
    write_file(
        &file,
        "\u{FEFF}2025-08-01;200;\"ok\";10.0.0.1\r\n2025-08-02;404;\"missing\";10.0.0.2\r\n",
    );

    let output = run(&["-F", "json", "check", file.to_str().expect("utf8 path")]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("check output should be JSON");
    assert_eq!(value["check"]["records"], 2);
    assert_eq!(
        value["check"]["format_errors"]
            .as_array()
            .expect("format errors array")
            .len(),
        0
    );
}
