//! # Tranx Types Crate
//!
//! Block and transaction containers consumed by the proof builder.
//!
//! ## Design Principles
//!
//! - **Opaque to the core**: the proof builder never inspects transaction
//!   fields; it only asks for their canonical encoding.
//! - **Serde-friendly**: byte fields serialize as hex strings so blocks can
//!   be loaded from JSON fixtures and CLI input.

pub mod entities;

pub use entities::*;
