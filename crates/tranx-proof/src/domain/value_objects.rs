//! # Value Objects
//!
//! Configuration for the proof service.

use serde::{Deserialize, Serialize};
use std::env;

/// Default number of idle scratch buffers kept by a pool.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Default initial capacity of a scratch buffer in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;

/// Scratch buffers that grew past this size are dropped instead of pooled.
pub const MAX_RETAINED_BUFFER: usize = 1 << 20;

/// Default minimum batch size for parallel proof generation.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Configuration for the transaction proof service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Maximum idle scratch buffers kept for reuse (default: 64).
    pub pool_capacity: usize,
    /// Initial capacity of a fresh scratch buffer (default: 512).
    pub buffer_capacity: usize,
    /// Batches at least this large are proven in parallel (default: 4).
    pub parallel_threshold: usize,
    /// Make the trie reject keys that do not ascend (default: true).
    ///
    /// The derived insertion order always ascends, so a rejection means the
    /// build sequence itself is wrong.
    pub strict_key_order: bool,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            strict_key_order: true,
        }
    }
}

impl ProofConfig {
    /// Small pool, always sequential.
    pub fn for_testing() -> Self {
        Self {
            pool_capacity: 2,
            buffer_capacity: 64,
            parallel_threshold: usize::MAX,
            strict_key_order: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TRANX_POOL_CAPACITY`: Idle buffers kept (default: 64)
    /// - `TRANX_BUFFER_CAPACITY`: Initial buffer size in bytes (default: 512)
    /// - `TRANX_PARALLEL_THRESHOLD`: Minimum parallel batch (default: 4)
    /// - `TRANX_STRICT_KEY_ORDER`: Reject out-of-order keys (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            pool_capacity: parse_var("TRANX_POOL_CAPACITY").unwrap_or(defaults.pool_capacity),
            buffer_capacity: parse_var("TRANX_BUFFER_CAPACITY")
                .unwrap_or(defaults.buffer_capacity),
            parallel_threshold: parse_var("TRANX_PARALLEL_THRESHOLD")
                .unwrap_or(defaults.parallel_threshold),
            strict_key_order: env::var("TRANX_STRICT_KEY_ORDER")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.strict_key_order),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
