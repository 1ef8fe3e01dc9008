#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use pather::grid::{Connectivity, Grid, GridGraph};
use pather::{Graph, StateCost};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Costs of every state reachable from `start`, by exhaustive Dijkstra.
pub fn dijkstra<G: Graph>(graph: &G, start: G::State) -> BTreeMap<G::State, f32> {
    let mut dist = BTreeMap::from([(start, 0.0f32)]);
    let mut done = BTreeSet::new();
    let mut adjacent = vec![];

    loop {
        let Some((&state, &cost)) = dist
            .iter()
            .filter(|(s, _)| !done.contains(*s))
            .min_by(|a, b| a.1.total_cmp(b.1))
        else {
            break;
        };
        done.insert(state);

        adjacent.clear();
        graph.adjacent_cost(state, &mut adjacent);
        for &StateCost { state: next, cost: edge } in &adjacent {
            if edge >= f32::MAX {
                continue;
            }
            let new_cost = cost + edge;
            let known = dist.entry(next).or_insert(f32::INFINITY);
            if new_cost < *known {
                *known = new_cost;
            }
        }
    }
    dist
}

/// Sum of the edge costs along `path`, as reported by the graph.
///
/// Panics if two consecutive states are not adjacent.
pub fn path_cost<G: Graph>(graph: &G, path: &[G::State]) -> f32 {
    let mut adjacent = vec![];
    let mut total = 0.0;
    for step in path.windows(2) {
        adjacent.clear();
        graph.adjacent_cost(step[0], &mut adjacent);
        let edge = adjacent
            .iter()
            .find(|sc| sc.state == step[1])
            .unwrap_or_else(|| panic!("{:?} is not adjacent to {:?}", step[1], step[0]));
        total += edge.cost;
    }
    total
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(1.0)
}

/// Random weighted map: about a quarter of the cells are blocked, the rest cost 1 to 4.
pub fn random_map(seed: u64, width: i32, height: i32, connectivity: Connectivity) -> GridGraph {
    let mut rng = Pcg64::seed_from_u64(seed);
    let cells = Grid::new(width, height, |_, _| {
        if rng.gen_bool(0.25) {
            None
        } else {
            Some(rng.gen_range(1..=4) as f32)
        }
    });
    GridGraph::new(cells, connectivity)
}

/// Random passable cells of `map`.
pub fn random_endpoints(seed: u64, map: &GridGraph, count: usize) -> Vec<((i32, i32), (i32, i32))> {
    let mut rng = Pcg64::seed_from_u64(seed ^ 0xcafe_f00d_d15e_a5e5);
    let open: Vec<_> = (0..map.height())
        .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| map.is_passable(x, y))
        .collect();
    if open.is_empty() {
        return vec![];
    }
    (0..count)
        .map(|_| {
            let a = open[rng.gen_range(0..open.len())];
            let b = open[rng.gen_range(0..open.len())];
            (a, b)
        })
        .collect()
}
