//! Clinical filter worker main executable

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

use clinical_filter_worker::{common, filter};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Post-inheritance filtering of candidate variants",
    long_about = "This tool trims and removes candidates after inheritance classification"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter-related commands.
    Filter(Filter),
}

/// Parsing of "filter *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Filter {
    /// The sub command to run
    #[command(subcommand)]
    command: FilterCommands,
}

/// Enum supporting the parsing of "filter *" sub commands.
#[derive(Debug, Subcommand)]
enum FilterCommands {
    Run(filter::cli::RunArgs),
    Batch(filter::cli::BatchArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Filter(cmd) => match &cmd.command {
                FilterCommands::Run(args) => filter::cli::run(&cli.common, args)?,
                FilterCommands::Batch(args) => filter::cli::run_batch(&cli.common, args)?,
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
