use ahash::AHashSet;
use pather_core::{Graph, StateCost};

use crate::Point16;

pub const ORTHOGONAL_COST: f32 = 1.0;
pub const DIAGONAL_COST: f32 = 1.2;

// Counter-clockwise from east.
const NEIGHBORS: [(i16, i16, f32); 8] = [
    (1, 0, ORTHOGONAL_COST),
    (1, 1, DIAGONAL_COST),
    (0, 1, ORTHOGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (-1, 0, ORTHOGONAL_COST),
    (-1, -1, DIAGONAL_COST),
    (0, -1, ORTHOGONAL_COST),
    (1, -1, DIAGONAL_COST),
];

/// Sparse graph of road points. Every road point connects to the road points among its eight
/// neighbors.
#[derive(Clone, Debug, Default)]
pub struct RoadMap {
    roads: AHashSet<Point16>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a road map from text: each line is a row (`b`), each character a column (`a`), and
    /// every character in `road` marks a road point.
    ///
    /// Rows and columns beyond the range of `i16` are ignored.
    pub fn parse(text: &str, road: &[char]) -> Self {
        let mut map = RoadMap::new();
        for (b, line) in text.lines().enumerate() {
            let Ok(b) = i16::try_from(b) else {
                break;
            };
            for (a, cell) in line.chars().enumerate() {
                let Ok(a) = i16::try_from(a) else {
                    break;
                };
                if road.contains(&cell) {
                    map.insert(Point16::new(a, b));
                }
            }
        }
        tracing::debug!(points = map.len(), "read road map");
        map
    }

    /// Returns whether the point was newly added.
    pub fn insert(&mut self, point: Point16) -> bool {
        self.roads.insert(point)
    }

    pub fn remove(&mut self, point: Point16) -> bool {
        self.roads.remove(&point)
    }

    pub fn contains(&self, point: Point16) -> bool {
        self.roads.contains(&point)
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}

impl FromIterator<Point16> for RoadMap {
    fn from_iter<I: IntoIterator<Item = Point16>>(iter: I) -> Self {
        RoadMap {
            roads: iter.into_iter().collect(),
        }
    }
}

impl Graph for RoadMap {
    type State = Point16;

    /// Octile distance with diagonal cost 1.2.
    fn least_cost_estimate(&self, start: Point16, end: Point16) -> f32 {
        let da = (start.a as i32).abs_diff(end.a as i32) as f32;
        let db = (start.b as i32).abs_diff(end.b as i32) as f32;
        da.max(db) * ORTHOGONAL_COST + da.min(db) * (DIAGONAL_COST - ORTHOGONAL_COST)
    }

    fn adjacent_cost(&self, state: Point16, adjacent: &mut Vec<StateCost<Point16>>) {
        for &(da, db, cost) in &NEIGHBORS {
            if let Some(neighbor) = state.checked_offset(da, db) {
                if self.contains(neighbor) {
                    adjacent.push(StateCost::new(neighbor, cost));
                }
            }
        }
    }

    fn print_state_info(&self, state: Point16) -> String {
        state.to_string()
    }
}
