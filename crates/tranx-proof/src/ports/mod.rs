//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the proof service.
//!
//! - **Driving Ports (Inbound)**: APIs consumed by the CLI and other callers
//! - **Driven Ports (Outbound)**: SPIs implemented by adapters (trie, encoder)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
