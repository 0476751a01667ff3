use log_regex_filter::{cli_parse, run};

fn main() {
    let cli = cli_parse();

    // RUST_LOG overrides the level picked from -v/-q
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "off",
        (false, 0) => "error",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
