use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `peerlist` binary.
#[derive(Debug, Parser)]
#[command(
    name = "peerlist",
    version,
    about = "peerlist - peer review listing toolbox"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter an exported list of reviews the way the listing page does
    Filter(FilterArgs),
    /// Query the user lookup endpoint once
    Lookup(LookupArgs),
    /// Run the review form checks without submitting anything
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// JSON file holding an array of `{rating, project, user_name}` entries
    #[arg(long)]
    pub entries: String,

    /// Minimum rating; non-numeric values disable the threshold
    #[arg(long)]
    pub rating: Option<String>,

    /// Exact project category
    #[arg(long)]
    pub project: Option<String>,

    /// Case-insensitive substring of the reviewed user's name
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Name or email fragment
    pub query: String,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Email of the reviewed colleague
    #[arg(long, default_value = "")]
    pub email: String,

    /// Chosen rating
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub rating: Option<u32>,

    /// Review comment
    #[arg(long, default_value = "")]
    pub comment: String,
}
