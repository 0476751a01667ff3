use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate semicolon-delimited log files and filter their rows with regular expressions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config file, or a built-in template name (strict, lenient)
    #[arg(long, global = true, env = "LOG_REGEX_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the report to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// When to use colors in text output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the report, no diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every line of a log file and list the rejected ones
    Check {
        /// Log file to validate
        file: PathBuf,
    },
    /// Show the records whose fields match the given patterns
    Filter {
        /// Log file to filter
        file: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Match patterns case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Let ^ and $ match at line boundaries inside a field
        #[arg(long)]
        multiline: bool,

        /// Also list lines rejected by validation
        #[arg(long)]
        show_errors: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Filter expression, e.g. 'status:^(200|404)$ ip:^10\.'
    #[arg(long)]
    pub filter: Option<String>,

    /// Pattern for the date field
    #[arg(long)]
    pub date: Option<String>,

    /// Pattern for the status code field
    #[arg(long, alias = "statuscode")]
    pub status: Option<String>,

    /// Pattern for the description field
    #[arg(long)]
    pub description: Option<String>,

    /// Pattern for the origin IP field
    #[arg(long, alias = "iporigen")]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
