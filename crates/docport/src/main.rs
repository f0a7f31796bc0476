//! docport CLI - Documentation content API.
//!
//! Provides commands for:
//! - `serve`: Start the content API server
//! - `resolve`: Resolve a single document and print the response envelope

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ResolveArgs, ServeArgs};
use output::Output;

/// docport - Documentation content API.
#[derive(Parser)]
#[command(name = "docport", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content API server.
    Serve(ServeArgs),
    /// Resolve one document and print it as JSON.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Resolve(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG (errors only when unset)
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so `resolve` output on stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
