//! denv CLI - package descriptors for cframegraph

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("denv=debug")
    } else {
        EnvFilter::new("denv=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let Cli {
        verbose,
        no_color,
        descriptors,
        command,
    } = cli;
    let session = || Session::new(verbose, no_color, descriptors.as_deref());

    // Execute command
    match command {
        Commands::Describe(args) => commands::describe::execute(args, &mut session()?),
        Commands::Tree(args) => commands::tree::execute(args, &mut session()?),
        Commands::Targets(args) => commands::targets::execute(args, &mut session()?),
        Commands::Verify(args) => commands::verify::execute(args, &mut session()?),
        Commands::Fingerprint(args) => commands::fingerprint::execute(args, &mut session()?),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
