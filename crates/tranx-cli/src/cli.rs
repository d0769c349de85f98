//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tranx: transaction inclusion proofs over the block transaction trie
#[derive(Parser, Debug)]
#[command(name = "tranx", version)]
#[command(about = "Build and verify transaction inclusion proofs")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "TRANX_JSON_LOGS")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the inclusion proof for one transaction of a block
    Prove(ProveArgs),
}

#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Block JSON file (header and transactions)
    #[arg(short, long)]
    pub block: PathBuf,

    /// Index of the transaction within the block
    #[arg(short, long)]
    pub index: u64,

    /// Check the proof against the header's transactions root
    #[arg(long)]
    pub verify: bool,
}
