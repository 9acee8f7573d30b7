//! Layer Shortcuts - technology file tooling
//!
//! Validates, generates and exercises the per-technology shortcut files the
//! layout viewer plugin loads.
//!
//! # Usage
//!
//! ```bash
//! # Check every technology file on the configured search path
//! layer-shortcuts validate
//!
//! # Write the built-in example and try one of its shortcuts
//! layer-shortcuts example --output sg13g2.json
//! layer-shortcuts simulate --config sg13g2.json --key 1 --layer Metal1.drawing --layer Metal2.drawing
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use layer_shortcuts::cli::{ConflictsArgs, ExampleArgs, SimulateArgs, ValidateArgs};
use layer_shortcuts::constants::APP_NAME;

/// Layer Shortcuts - technology file tooling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate technology files
    Validate(ValidateArgs),
    /// Write the built-in example technology
    Example(ExampleArgs),
    /// Run one shortcut against a list of layers
    Simulate(SimulateArgs),
    /// Check keys against existing bindings
    Conflicts(ConflictsArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Validate(args) => args.execute(),
        Command::Example(args) => args.execute(),
        Command::Simulate(args) => args.execute(),
        Command::Conflicts(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("{APP_NAME}: {e}");
        std::process::exit(e.code.code());
    }
}
