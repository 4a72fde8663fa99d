use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "errtree",
    about = "Structural diff for error trees",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two error trees stored as JSON
    Diff(DiffArgs),
    /// Compare only the annotations of two root errors
    Annotations(AnnotationsArgs),
}

/// A JSON file holds one error tree, or `null` for an absent error.
#[derive(Args)]
pub struct DiffArgs {
    pub actual: PathBuf,
    pub expected: PathBuf,
    /// TOML file with comparator options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Compare messages of aggregate errors too
    #[arg(long)]
    pub strict_aggregate_messages: bool,
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Args)]
pub struct AnnotationsArgs {
    pub actual: PathBuf,
    pub expected: PathBuf,
}
