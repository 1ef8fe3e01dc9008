//! Graphs over grids and maps for the `pather` solver.

mod direction;
mod grid;
mod grid_graph;
mod map_reader;
mod point16;
mod road_map;

pub mod hex;

pub use self::direction::*;
pub use self::grid::*;
pub use self::grid_graph::*;
pub use self::map_reader::*;
pub use self::point16::*;
pub use self::road_map::*;
