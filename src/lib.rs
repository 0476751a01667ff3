pub mod cli;
pub mod config;
pub mod filter;
pub mod parser;
pub mod report;
pub mod session;

use anyhow::Context;
use std::path::Path;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, PatternArgs, cli_parse};
pub use filter::{
    FieldMatcher, FieldPatterns, FilterExpression, MatcherSet, RegexCompileError, RegexFlags,
    compile_matchers, filter_records,
};
pub use parser::{
    Field, FormatError, FormatErrorKind, LoadError, ParsedLog, Record, ValidationProfile,
    load_log_file, parse_log_file, parse_log_line, parse_log_text, parse_log_text_strict,
};
pub use session::{FilterSession, SessionSummary};

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::unset_override(),
    }
}

/// Build the field patterns from the --filter expression and the per-field options.
///
/// Per-field options win over the same field in the expression.
pub fn build_patterns(args: &PatternArgs) -> anyhow::Result<FieldPatterns> {
    let mut patterns = match &args.filter {
        Some(expr) => FilterExpression::parse(expr)
            .with_context(|| format!("Invalid filter expression: {expr}"))?
            .into_patterns(),
        None => FieldPatterns::new(),
    };

    let overrides = [
        (Field::Date, &args.date),
        (Field::StatusCode, &args.status),
        (Field::Description, &args.description),
        (Field::OriginIp, &args.ip),
    ];
    for (field, pattern) in overrides {
        if let Some(pattern) = pattern {
            patterns.set(field, pattern.clone());
        }
    }

    Ok(patterns)
}

fn emit_report(
    report: &str,
    plain_report: Option<String>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    print!("{report}");
    if !report.ends_with('\n') {
        println!();
    }

    if let Some(path) = output {
        let content = plain_report.as_deref().unwrap_or(report);
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
    }
    Ok(())
}

/// Render a text report without ANSI colors, for writing to a file
fn render_plain(mode: ColorMode, render: impl Fn() -> String) -> String {
    colored::control::set_override(false);
    let plain = render();
    apply_color_mode(mode);
    plain
}

/// Load `--config` as a file, or as a built-in template name when no such file exists
fn resolve_config(path: Option<&Path>) -> anyhow::Result<config::FilterConfig> {
    let Some(path) = path else {
        return Ok(config::default_config().clone());
    };
    if path.exists() {
        return config::load_config(Some(path)).context("Failed to load config");
    }

    let name = path.to_string_lossy();
    let template = config::load_builtin_template(&name).with_context(|| {
        format!(
            "Config '{}' not found as file path or built-in template. Built-ins: {}",
            path.display(),
            config::builtin_template_names().join(", ")
        )
    })?;
    log::info!("using built-in config template: {}", template.profile_name);
    Ok(template)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    apply_color_mode(cli.color);

    log::info!("config profile: {}", config.profile_name);
    log::info!("validation profile: {}", config.validation.profile);
    if let Some(out_path) = &cli.output {
        log::info!("output will be written to: {}", out_path.display());
    }

    let profile = config.validation.profile;
    let output = cli.output.as_deref();

    match &cli.command {
        Commands::Check { file } => {
            let parsed = parse_log_file(file, profile)?;

            match cli.format {
                OutputFormat::Text => {
                    let render = || report::format_check_text(file, &parsed, profile);
                    let plain = output.map(|_| render_plain(cli.color, render));
                    emit_report(&render(), plain, output)?;
                }
                OutputFormat::Json => {
                    emit_report(&report::format_check_json(file, &parsed, profile), None, output)?;
                }
            }
        }
        Commands::Filter {
            file,
            patterns,
            case_sensitive,
            multiline,
            show_errors,
        } => {
            let text = load_log_file(file)?;
            let flags = config
                .flags
                .case_insensitive(config.flags.case_insensitive && !case_sensitive)
                .multiline(config.flags.multiline || *multiline);

            let mut session = FilterSession::new(profile, flags);
            session.load_text(&text);
            session.set_patterns(build_patterns(patterns)?);

            match cli.format {
                OutputFormat::Text => {
                    let render = || report::format_filter_text(&session, *show_errors);
                    let plain = output.map(|_| render_plain(cli.color, render));
                    emit_report(&render(), plain, output)?;
                }
                OutputFormat::Json => {
                    let json = report::format_filter_json(file, &session, *show_errors);
                    emit_report(&json, None, output)?;
                }
            }
        }
    }

    Ok(())
}
