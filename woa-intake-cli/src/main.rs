//! woa-intake CLI
//!
//! Command-line interface for turning game compatibility form submissions
//! into catalog entries and user reports.

mod cli_types;
mod commands;
mod console;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let flags = cli.paths.to_settings();

    match cli.command {
        Commands::Process { limit, dry_run } => {
            commands::process::run_process(&flags, limit, dry_run)
        }
        Commands::Pending => commands::pending::run_pending(&flags),
        Commands::Match { title } => commands::lookup::run_match(&flags, &title),
        Commands::Slug { title } => {
            commands::lookup::run_slug(&title);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&flags),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

/// Log to stdout: bare messages by default, timestamps and levels with
/// `--verbose`. `RUST_LOG` overrides the level.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}
