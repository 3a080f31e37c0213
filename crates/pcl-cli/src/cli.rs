use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pcl",
    about = "Prediction Calibration Ledger — note your predictions, resolve them, measure your calibration",
    version,
)]
pub struct Cli {
    /// With no subcommand, prints the one-line summary.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Ledger file (overrides PCL_LEDGER and the config file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a new prediction
    Add(AddArgs),
    /// Show full details of one or more predictions
    Show(ShowArgs),
    /// List predictions in one-line format
    List(ListArgs),
    /// Edit the mutable fields (tags, proof) of a prediction
    Edit(EditArgs),
    /// Resolve a prediction to its final outcome
    Solve(SolveArgs),
    /// Delete a prediction
    Delete(DeleteArgs),
    /// Show status counts, the next term, and the calibration report
    Stats(StatsArgs),
    /// One line: what needs attention next
    Summary,
    /// Show the next prediction coming to term
    Next,
}

#[derive(Args)]
pub struct AddArgs {
    /// The claim being predicted
    pub statement: String,
    /// Stated probability: 0.7, 70%, 7/10, or "1 in 3"
    #[arg(short, long)]
    pub confidence: String,
    /// Earliest resolution time (RFC 3339 or YYYY-MM-DD)
    #[arg(short, long)]
    pub term: Option<String>,
    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Evidence text or link
    #[arg(short, long)]
    pub proof: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Ids or unambiguous id prefixes
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Keep predictions carrying this tag (repeatable, any match)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Keep predictions in this resolution state
    #[arg(long, default_value = "any")]
    pub outcome: String,
    /// Keep predictions created after this time
    #[arg(long)]
    pub created_after: Option<String>,
    /// Keep predictions created before this time
    #[arg(long)]
    pub created_before: Option<String>,
    /// Keep predictions whose term is before this time
    #[arg(long)]
    pub term_before: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Id or unambiguous id prefix
    pub id: String,
    /// FIELD=VALUE assignments; only tags= and proof= are mutable
    #[arg(required = true)]
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct SolveArgs {
    /// Id or unambiguous id prefix
    pub id: String,
    /// Final outcome: true or false
    #[arg(short, long)]
    pub outcome: String,
    /// Evidence recorded together with the resolution
    #[arg(short, long)]
    pub proof: Option<String>,
    /// Resolve even if the term has not been reached
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Id or unambiguous id prefix
    pub id: String,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Restrict to predictions carrying this tag (repeatable, any match)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}
