//! Tranx CLI: transaction inclusion proofs from the command line.
//!
//! ```text
//! tranx prove --block block.json --index 7 --verify
//!     │
//!     ├─ read block JSON (header + transactions)
//!     ├─ build proof for the index
//!     ├─ optionally verify against header.transactions_root
//!     └─ print ProveReport as JSON
//! ```

pub mod cli;
pub mod commands;
pub mod telemetry;

pub use cli::{Cli, Command, ProveArgs};
pub use commands::{load_block, prove, ProveReport, Verification};
pub use telemetry::{init_logging, LogConfig};
