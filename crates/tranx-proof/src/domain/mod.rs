//! # Domain Layer
//!
//! Key derivation, proof results and configuration for transaction proofs.
//!
//! ## Hexagonal Architecture
//!
//! This module contains NO I/O dependencies. The trie, the transaction
//! encoder and the buffer pool are reached through the `ports` module.

pub mod entities;
pub mod errors;
pub mod key_derivation;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use key_derivation::*;
pub use value_objects::*;
