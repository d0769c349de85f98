//! Tranx: build and verify transaction inclusion proofs.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use tranx_cli::{init_logging, load_block, prove, Cli, Command, LogConfig};
use tranx_proof::{ProofConfig, TransactionProofService};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    log_config.json_logs |= cli.json_logs;
    init_logging(&log_config)?;

    match cli.command {
        Command::Prove(args) => {
            let block = load_block(&args.block)?;
            let service = TransactionProofService::new(ProofConfig::from_env());
            let report = prove(&service, &block, args.index, args.verify);

            let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
            println!("{json}");

            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                error!(index = args.index, "Proof check failed");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
