//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use denv::core::Separator;
use denv::ops::OutputFormat;

/// denv - package descriptors for cframegraph and its dependencies
#[derive(Parser)]
#[command(name = "denv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory of additional package descriptors (*.toml)
    #[arg(long, global = true, env = "DENV_DESCRIPTORS")]
    pub descriptors: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the descriptor of a package
    Describe(DescribeArgs),

    /// Display the package dependency tree
    Tree(TreeArgs),

    /// List all targets in build order
    Targets(TargetsArgs),

    /// Check the wiring of a package
    Verify(VerifyArgs),

    /// Print the fingerprint of a package descriptor
    Fingerprint(FingerprintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Package to describe
    #[arg(default_value = "cframegraph")]
    pub package: String,

    /// Output format (toml, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Path separator (slash, backslash)
    #[arg(long)]
    pub separator: Option<Separator>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Package to show the tree for
    #[arg(default_value = "cframegraph")]
    pub package: String,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Package whose targets (and dependencies' targets) to list
    #[arg(default_value = "cframegraph")]
    pub package: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Package to verify
    #[arg(default_value = "cframegraph")]
    pub package: String,

    /// Also verify every dependency package
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct FingerprintArgs {
    /// Package to fingerprint
    #[arg(default_value = "cframegraph")]
    pub package: String,

    /// Print the short (16 character) form
    #[arg(long)]
    pub short: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
