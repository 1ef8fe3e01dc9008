//! Hexagonal grids in offset-column layout.
//!
//! Column `a` runs along world `x`, row `b` along world `z`. Odd columns are shifted half a row
//! towards negative `z`. Each cell has 12 neighbors: the 6 cells sharing an edge, and the 6
//! cells reached by going straight through a vertex ("diagonals").

use pather_core::{Graph, PathState, StateCost};

use crate::{Grid, Point16};

pub const NEIGHBOR_COUNT: usize = 12;

// Row 0: column offset. Rows 1 and 2: row offset for even and odd columns.
const NEIGHBOR_OFFSET: [[i16; NEIGHBOR_COUNT]; 3] = [
    [-2, 0, 2, 0, -1, -1, -1, -1, 1, 1, 1, 1],
    [0, 1, 0, -1, -1, 0, 2, 1, -1, 0, 2, 1],
    [0, 1, 0, -1, -2, -1, 1, 0, -2, -1, 1, 0],
];

const NEIGHBOR_MODE: [NeighborMode; NEIGHBOR_COUNT] = {
    use NeighborMode::{Diagonal, Direct};
    [
        Diagonal, Direct, Diagonal, Direct, Diagonal, Direct, Diagonal, Direct, Diagonal, Direct,
        Diagonal, Direct,
    ]
};

const HALF_SQRT_3: f32 = 0.866_025_4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NeighborMode {
    /// Shares an edge.
    Direct,
    /// Lies past a vertex, between two direct neighbors.
    Diagonal,
}

/// Cell of a hexagonal grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexPoint(pub Point16);

impl HexPoint {
    pub const fn new(a: i16, b: i16) -> Self {
        HexPoint(Point16::new(a, b))
    }

    pub fn a(self) -> i16 {
        self.0.a
    }

    pub fn b(self) -> i16 {
        self.0.b
    }

    #[inline(always)]
    fn row_offsets(self) -> &'static [i16; NEIGHBOR_COUNT] {
        &NEIGHBOR_OFFSET[1 + (self.0.a & 1) as usize]
    }

    /// The `i`th neighbor, or `None` if it is outside the 16-bit coordinate space.
    ///
    /// # Panics
    ///
    /// Panics if `i >= NEIGHBOR_COUNT`.
    pub fn neighbor(self, i: usize) -> Option<HexPoint> {
        self.0
            .checked_offset(NEIGHBOR_OFFSET[0][i], self.row_offsets()[i])
            .map(HexPoint)
    }

    pub fn neighbor_mode(i: usize) -> NeighborMode {
        NEIGHBOR_MODE[i]
    }
}

impl PathState for HexPoint {
    #[inline(always)]
    fn state_bits(&self) -> u64 {
        self.0.state_bits()
    }
}

/// Size of the cells of a hexagonal grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HexMetrics {
    distance_y: f32,
    distance_x: f32,
    half_distance_y: f32,
}

impl HexMetrics {
    /// Metrics for hexagons `size` across between opposite edges.
    ///
    /// # Panics
    ///
    /// Panics unless `size` is positive and finite.
    #[track_caller]
    pub fn new(size: f32) -> Self {
        assert!(size > 0.0 && size.is_finite(), "hexagon size must be positive");
        HexMetrics {
            distance_y: size,
            distance_x: size * HALF_SQRT_3,
            half_distance_y: size * 0.5,
        }
    }

    /// Distance between the centers of adjacent cells in one column.
    pub fn distance_y(&self) -> f32 {
        self.distance_y
    }

    /// Distance between adjacent columns.
    pub fn distance_x(&self) -> f32 {
        self.distance_x
    }

    pub fn neighbor_cost(&self, mode: NeighborMode) -> f32 {
        match mode {
            NeighborMode::Direct => self.distance_y,
            NeighborMode::Diagonal => 2.0 * self.distance_x,
        }
    }

    /// World `(x, z)` of the center of `p`.
    pub fn center(&self, p: HexPoint) -> (f32, f32) {
        let odd = (p.a() & 1) as f32;
        (
            p.a() as f32 * self.distance_x,
            p.b() as f32 * self.distance_y - odd * self.half_distance_y,
        )
    }

    /// The cell containing world `(x, z)`, approximately; points near a cell boundary may land
    /// in the neighboring cell.
    pub fn point_at(&self, x: f32, z: f32) -> HexPoint {
        let a = (x / self.distance_x).round() as i16;
        let odd = (a & 1) as f32;
        let b = ((z + odd * self.half_distance_y) / self.distance_y).round() as i16;
        HexPoint::new(a, b)
    }
}

/// Hexagonal grid graph. Moves cost the distance between cell centers.
#[derive(Clone, Debug)]
pub struct HexGrid {
    passable: Grid<bool>,
    metrics: HexMetrics,
}

impl HexGrid {
    /// Grid of open cells with columns `0..width` and rows `0..height`.
    pub fn new(width: i16, height: i16, metrics: HexMetrics) -> Self {
        Self::from_grid(
            Grid::new(width as i32, height as i32, |_, _| true),
            metrics,
        )
    }

    /// Grid with the passability of cell `(a, b)` taken from `passable[(a, b)]`.
    pub fn from_grid(passable: Grid<bool>, metrics: HexMetrics) -> Self {
        HexGrid { passable, metrics }
    }

    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    pub fn is_passable(&self, p: HexPoint) -> bool {
        self.passable
            .get(p.a() as i32, p.b() as i32)
            .copied()
            .unwrap_or(false)
    }

    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    #[track_caller]
    pub fn set_passable(&mut self, p: HexPoint, passable: bool) {
        self.passable[(p.a() as i32, p.b() as i32)] = passable;
    }
}

impl Graph for HexGrid {
    type State = HexPoint;

    fn least_cost_estimate(&self, start: HexPoint, end: HexPoint) -> f32 {
        let (x0, z0) = self.metrics.center(start);
        let (x1, z1) = self.metrics.center(end);
        (x1 - x0).hypot(z1 - z0)
    }

    fn adjacent_cost(&self, state: HexPoint, adjacent: &mut Vec<StateCost<HexPoint>>) {
        for i in 0..NEIGHBOR_COUNT {
            let Some(neighbor) = state.neighbor(i) else {
                continue;
            };
            if self.is_passable(neighbor) {
                let cost = self.metrics.neighbor_cost(HexPoint::neighbor_mode(i));
                adjacent.push(StateCost::new(neighbor, cost));
            }
        }
    }

    fn print_state_info(&self, state: HexPoint) -> String {
        state.0.to_string()
    }
}
