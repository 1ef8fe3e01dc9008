//! Error types for the path search core.
//!
//! Failing to find a path is not an error; see [`SolveStatus`](crate::SolveStatus). Errors are
//! reserved for resource exhaustion inside the node pool.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias using [`PathError`].
pub type Result<T> = std::result::Result<T, PathError>;

/// Resource exhaustion while searching.
#[derive(Debug, Error)]
pub enum PathError {
    /// A new block of path nodes could not be allocated.
    #[error("failed to allocate a block of {nodes} path nodes")]
    NodeAllocation {
        /// Number of nodes in the requested block.
        nodes: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// The state hash table could not be allocated.
    #[error("failed to allocate a hash table of {buckets} buckets")]
    HashAllocation {
        /// Number of buckets requested.
        buckets: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// The neighbor cache could not be allocated or grown.
    #[error("failed to allocate a neighbor cache of {entries} entries")]
    CacheAllocation {
        /// Number of cache entries requested.
        entries: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// More nodes were requested than a node index can address.
    #[error("path node pool exhausted its index space at {0} nodes")]
    IndexSpaceExhausted(usize),
}
