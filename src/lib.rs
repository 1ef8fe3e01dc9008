//! A* path search with pooled, frame-stamped node memory.
//!
//! ```
//! use pather::grid::{GridGraph, FOUR_CONNECTED};
//! use pather::{Pather, SolveStatus};
//!
//! let map = GridGraph::uniform(5, 5, FOUR_CONNECTED);
//! let mut pather = Pather::with_capacity(&map, 25, 4);
//! let mut path = vec![];
//! let status = pather.solve((0, 0), (4, 4), &mut path).unwrap();
//! assert_eq!(status, SolveStatus::Solved { cost: 8.0 });
//! assert_eq!(path.len(), 9);
//! ```

pub use pather_core::*;
pub use pather_grid as grid;
