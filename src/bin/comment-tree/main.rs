//! CLI tool to inspect and edit a comment tree stored as JSON.
//!
//! Usage:
//!   comment-tree --input comments.json [--filter unresolved] [--toggle ID]... [--output out.json] [--stats]

mod stats;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use editorial::comments::{tree, Comment, FilterMode};
use stats::TreeStats;

#[derive(Parser, Debug)]
#[command(
    name = "comment-tree",
    about = "Filter, resolve and summarize a threaded comment tree",
    version
)]
struct Args {
    /// Input JSON file: an array of comments
    #[arg(short, long)]
    input: PathBuf,

    /// Keep only matching comments (all, resolved, unresolved)
    #[arg(short, long, default_value = "all", env = "COMMENT_TREE_FILTER")]
    filter: String,

    /// Toggle the resolved flag of a comment; may be repeated
    #[arg(long = "toggle", value_name = "ID")]
    toggle: Vec<String>,

    /// Output file path (prints to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print statistics about the tree before and after
    #[arg(long, default_value = "false")]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mode: FilterMode = args.filter.parse().context("Invalid --filter")?;

    // 1. Read and parse input
    let input_path = &args.input;
    if !input_path.exists() {
        anyhow::bail!("Input file does not exist: {}", input_path.display());
    }
    let json = std::fs::read_to_string(input_path).context("Failed to read input file")?;
    let mut comments: Vec<Comment> =
        serde_json::from_str(&json).context("Failed to parse comment JSON")?;
    info!(count = tree::count_all(&comments), "loaded comments");

    let before = TreeStats::collect(&comments);

    // 2. Toggles, applied in order
    for id in &args.toggle {
        if tree::find(&comments, id).is_none() {
            warn!(id = %id, "no comment with this id, toggle skipped");
            continue;
        }
        comments = tree::toggle_resolved(&comments, id);
        debug!(id = %id, "toggled");
    }

    // 3. Filter
    let visible = tree::filter(&comments, |c| mode.matches(c));
    let after = TreeStats::collect(&visible);

    // 4. Write output
    let out = serde_json::to_string_pretty(&visible).context("Failed to serialize comments")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &out).context("Failed to write output file")?;
            info!(path = %path.display(), "wrote comments");
        }
        None => println!("{out}"),
    }

    // 5. Optional stats
    if args.stats {
        eprintln!();
        before.print("Input");
        eprintln!();
        after.print(&format!("Output (filter: {mode})"));
    }

    Ok(())
}
