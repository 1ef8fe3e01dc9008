#![warn(missing_docs)]
//! Core types for `pather`: an A* solver that reuses its node memory between searches.
//!
//! The caller describes the search space by implementing [`Graph`] for some [`PathState`] type;
//! [`Pather`] does the rest. Nodes are stamped with the search generation that created them, so
//! consecutive searches never walk or free the pool. Neighbor lists are cached per state until
//! [`Pather::reset`].

mod closed_set;
mod config;
mod error;
mod node;
mod node_pool;
mod open_queue;
mod solver;
pub mod traits;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::node_pool::PoolStats;
pub use crate::solver::*;
pub use crate::traits::{Graph, PathState, StateCost};
