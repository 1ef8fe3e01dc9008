use std::f32::consts::SQRT_2;

use pather_core::{Graph, StateCost};

use crate::{Connectivity, Grid, DIAGONALS};

/// Weighted rectangular map.
///
/// Each cell has an entry cost, or `None` if it is blocked. Moving orthogonally into a cell costs
/// its entry cost; moving diagonally costs the entry cost times the diagonal factor. Diagonal
/// moves never cut the corner of a blocked cell.
#[derive(Clone, Debug)]
pub struct GridGraph {
    cells: Grid<Option<f32>>,
    connectivity: Connectivity,
    diagonal_factor: f32,
    min_cost: f32,
}

impl GridGraph {
    /// # Panics
    ///
    /// Panics if any entry cost is negative or NaN.
    #[track_caller]
    pub fn new(cells: Grid<Option<f32>>, connectivity: Connectivity) -> Self {
        let mut graph = GridGraph {
            cells,
            connectivity,
            diagonal_factor: SQRT_2,
            min_cost: 0.0,
        };
        for cost in graph.cells.storage().iter().flatten() {
            assert!(*cost >= 0.0, "entry costs must be non-negative");
        }
        graph.update_min_cost();
        graph
    }

    /// Grid of `width * height` open cells with entry cost 1.
    pub fn uniform(width: i32, height: i32, connectivity: Connectivity) -> Self {
        Self::new(Grid::new(width, height, |_, _| Some(1.0)), connectivity)
    }

    /// Sets the cost factor of diagonal moves. The default is `√2`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is less than 1.
    #[track_caller]
    pub fn with_diagonal_factor(mut self, factor: f32) -> Self {
        assert!(factor >= 1.0, "diagonal factor must be at least 1");
        self.diagonal_factor = factor;
        self
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn diagonal_factor(&self) -> f32 {
        self.diagonal_factor
    }

    /// Entry cost of `(x, y)`. `None` if the cell is blocked or outside the map.
    #[inline(always)]
    pub fn cost(&self, x: i32, y: i32) -> Option<f32> {
        self.cells.get(x, y).copied().flatten()
    }

    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.cost(x, y).is_some()
    }

    /// Changes the entry cost of a cell.
    ///
    /// Solvers cache neighbor lists, so a [`Pather`](pather_core::Pather) that has searched this
    /// map must be reset before searching it again.
    #[track_caller]
    pub fn set_cost(&mut self, x: i32, y: i32, cost: Option<f32>) {
        if let Some(cost) = cost {
            assert!(cost >= 0.0, "entry costs must be non-negative");
        }
        self.cells[(x, y)] = cost;
        self.update_min_cost();
    }

    fn update_min_cost(&mut self) {
        self.min_cost = self
            .cells
            .storage()
            .iter()
            .flatten()
            .copied()
            .reduce(f32::min)
            .unwrap_or(0.0);
    }

    /// Cost of the path from `start` to `end` on an empty map of minimum-cost cells.
    pub fn distance(&self, start: (i32, i32), end: (i32, i32)) -> f32 {
        let dx = start.0.abs_diff(end.0) as f32;
        let dy = start.1.abs_diff(end.1) as f32;
        let steps = if self.connectivity.is_disjoint(DIAGONALS) {
            dx + dy
        } else {
            // Two orthogonal moves are never more expensive than what a diagonal is worth.
            let diagonal = self.diagonal_factor.min(2.0);
            dx.max(dy) + (diagonal - 1.0) * dx.min(dy)
        };
        steps * self.min_cost
    }
}

impl Graph for GridGraph {
    type State = (i32, i32);

    fn least_cost_estimate(&self, start: (i32, i32), end: (i32, i32)) -> f32 {
        self.distance(start, end)
    }

    fn adjacent_cost(&self, (x, y): (i32, i32), adjacent: &mut Vec<StateCost<(i32, i32)>>) {
        if !self.is_passable(x, y) {
            return;
        }
        for dir in self.connectivity {
            let (dx, dy) = dir.offset();
            let Some(cost) = self.cost(x + dx, y + dy) else {
                continue;
            };
            let cost = match dir.components() {
                None => cost,
                Some((a, b)) => {
                    let (ax, ay) = a.offset();
                    let (bx, by) = b.offset();
                    if !self.is_passable(x + ax, y + ay) || !self.is_passable(x + bx, y + by) {
                        continue;
                    }
                    cost * self.diagonal_factor
                }
            };
            adjacent.push(StateCost::new((x + dx, y + dy), cost));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EIGHT_CONNECTED, FOUR_CONNECTED};

    fn neighbors(graph: &GridGraph, state: (i32, i32)) -> Vec<StateCost<(i32, i32)>> {
        let mut adjacent = vec![];
        graph.adjacent_cost(state, &mut adjacent);
        adjacent
    }

    #[test]
    fn four_connected_corner() {
        let graph = GridGraph::uniform(3, 3, FOUR_CONNECTED);
        let adjacent = neighbors(&graph, (0, 0));
        assert_eq!(
            adjacent,
            [StateCost::new((0, 1), 1.0), StateCost::new((1, 0), 1.0)]
        );
        assert_eq!(graph.least_cost_estimate((0, 0), (2, 2)), 4.0);
    }

    #[test]
    fn diagonals_do_not_cut_corners() {
        let mut graph = GridGraph::uniform(3, 3, EIGHT_CONNECTED);
        assert_eq!(neighbors(&graph, (1, 1)).len(), 8);

        graph.set_cost(1, 0, None);
        let adjacent = neighbors(&graph, (1, 1));
        assert_eq!(adjacent.len(), 5);
        assert!(!adjacent.iter().any(|sc| sc.state.1 == 0));
    }

    #[test]
    fn weighted_entry_costs() {
        let mut cells = Grid::new(2, 2, |_, _| Some(2.0));
        cells[(1, 1)] = Some(3.0);
        let graph = GridGraph::new(cells, EIGHT_CONNECTED);
        let adjacent = neighbors(&graph, (0, 0));
        assert_eq!(adjacent.len(), 3);
        assert!(adjacent.contains(&StateCost::new((1, 1), 3.0 * SQRT_2)));
        assert!(adjacent.contains(&StateCost::new((1, 0), 2.0)));

        // Scaled by the cheapest cell.
        let estimate = graph.least_cost_estimate((0, 0), (3, 1));
        assert!((estimate - 2.0 * (2.0 + SQRT_2)).abs() < 1e-5);
    }

    #[test]
    fn blocked_cells_have_no_neighbors() {
        let mut graph = GridGraph::uniform(2, 2, FOUR_CONNECTED);
        graph.set_cost(0, 0, None);
        assert!(neighbors(&graph, (0, 0)).is_empty());
        assert!(neighbors(&graph, (5, 5)).is_empty());
        assert_eq!(neighbors(&graph, (1, 0)), [StateCost::new((1, 1), 1.0)]);
    }

    #[test]
    fn large_diagonal_factor_keeps_estimate_admissible() {
        let graph = GridGraph::uniform(4, 4, EIGHT_CONNECTED).with_diagonal_factor(3.0);
        assert_eq!(graph.least_cost_estimate((0, 0), (3, 3)), 6.0);
    }
}
