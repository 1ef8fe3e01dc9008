//! End-to-end searches over the bundled graphs.

mod common;

use common::{approx_eq, dijkstra, path_cost};
use pather::grid::hex::{HexGrid, HexMetrics, HexPoint};
use pather::grid::{
    read_grid_map, Grid, GridGraph, Point16, RoadMap, DIAGONAL_COST, EIGHT_CONNECTED,
    FOUR_CONNECTED,
};
use pather::{
    ClosedImprovement, NeighborCache, Pather, PatherConfig, SolveStatus, StateCost,
};

/// 6x6 map with a wall along x = 2 whose only gap is at the bottom row.
fn walled_map() -> GridGraph {
    let cells = Grid::new(6, 6, |x, y| (x != 2 || y == 5).then_some(1.0));
    GridGraph::new(cells, FOUR_CONNECTED)
}

#[test]
fn test_open_grid_manhattan_cost() {
    let map = GridGraph::uniform(5, 5, FOUR_CONNECTED);
    let mut pather = Pather::with_capacity(&map, 25, 4);
    let mut path = vec![];

    let status = pather.solve((0, 0), (4, 4), &mut path).unwrap();
    assert_eq!(status, SolveStatus::Solved { cost: 8.0 });
    assert_eq!(path.len(), 9);
    assert_eq!(path_cost(&map, &path), 8.0);
}

#[test]
fn test_wall_forces_detour_through_gap() {
    let map = walled_map();
    let mut pather = Pather::with_capacity(&map, 36, 4);
    let mut path = vec![];

    let status = pather.solve((0, 0), (4, 4), &mut path).unwrap();
    assert_eq!(status, SolveStatus::Solved { cost: 10.0 });
    assert!(path.contains(&(2, 5)));
    assert_eq!(path_cost(&map, &path), 10.0);
}

#[test]
fn test_path_endpoints() {
    let map = walled_map();
    let mut pather = Pather::with_capacity(&map, 8, 4);
    let mut path = vec![];
    for (start, end) in [((0, 0), (5, 0)), ((5, 5), (0, 1)), ((3, 2), (1, 4))] {
        let status = pather.solve(start, end, &mut path).unwrap();
        assert!(status.is_solved());
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_eq!(path_cost(&map, &path), status.cost());
    }
}

#[test]
fn test_isolated_target_has_no_solution() {
    let map: RoadMap = [Point16::new(0, 0), Point16::new(1, 0), Point16::new(5, 5)]
        .into_iter()
        .collect();
    let mut pather = Pather::with_capacity(&map, 8, 8);
    let mut path = vec![Point16::new(9, 9)];

    let status = pather
        .solve(Point16::new(0, 0), Point16::new(5, 5), &mut path)
        .unwrap();
    assert_eq!(status, SolveStatus::NoSolution);
    assert_eq!(status.cost(), 0.0);
    assert!(path.is_empty());

    // Unreachable the other way around, too.
    let status = pather
        .solve(Point16::new(5, 5), Point16::new(0, 0), &mut path)
        .unwrap();
    assert_eq!(status, SolveStatus::NoSolution);
}

#[test]
fn test_blocked_target_has_no_solution() {
    let mut map = GridGraph::uniform(5, 5, EIGHT_CONNECTED);
    map.set_cost(4, 4, None);
    let mut pather = Pather::with_capacity(&map, 25, 8);
    assert_eq!(pather.find_path((0, 0), (4, 4)).unwrap(), None);
}

#[test]
fn test_start_end_same() {
    let map = GridGraph::uniform(5, 5, FOUR_CONNECTED);
    let mut pather = Pather::with_capacity(&map, 25, 4);
    let mut path = vec![(1, 1), (1, 2)];

    let status = pather.solve((2, 2), (2, 2), &mut path).unwrap();
    assert_eq!(status, SolveStatus::StartEndSame);
    assert_eq!(status.cost(), 0.0);
    assert_eq!(path, [(1, 1), (1, 2)]);
}

#[test]
fn test_octile_diagonal_path() {
    let map = GridGraph::uniform(8, 8, EIGHT_CONNECTED);
    let mut pather = Pather::with_capacity(&map, 64, 8);
    let (path, cost) = pather.find_path((0, 0), (7, 3)).unwrap().unwrap();

    assert!(approx_eq(cost, 4.0 + 3.0 * std::f32::consts::SQRT_2));
    assert_eq!(path.len(), 8);
    assert!(approx_eq(path_cost(&map, &path), cost));
}

#[test]
fn test_weighted_cells_are_avoided() {
    // A band of expensive cells is cheaper to walk around than through.
    let cells = Grid::new(7, 5, |x, y| match (x, y) {
        (3, 0..=3) => Some(20.0),
        _ => Some(1.0),
    });
    let map = GridGraph::new(cells, FOUR_CONNECTED);
    let mut pather = Pather::with_capacity(&map, 35, 4);
    let (path, cost) = pather.find_path((0, 0), (6, 0)).unwrap().unwrap();

    assert_eq!(cost, 14.0);
    assert!(path.contains(&(3, 4)));
    assert_eq!(dijkstra(&map, (0, 0))[&(6, 0)], 14.0);
}

#[test]
fn test_deterministic_after_reset() {
    let map = common::random_map(7, 24, 24, EIGHT_CONNECTED);
    let endpoints = common::random_endpoints(7, &map, 10);
    let mut pather = Pather::with_capacity(&map, 64, 8);

    for &(start, end) in &endpoints {
        pather.reset();
        let first = pather.find_path(start, end).unwrap();
        let first_checksum = pather.checksum();

        pather.reset();
        let second = pather.find_path(start, end).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_checksum, pather.checksum());

        let mut fresh = Pather::with_capacity(&map, 64, 8);
        assert_eq!(fresh.find_path(start, end).unwrap(), first);
    }
}

#[test]
fn test_reuse_across_frames_matches_reset() {
    let map = common::random_map(11, 30, 20, EIGHT_CONNECTED);
    let endpoints = common::random_endpoints(11, &map, 40);
    // Small blocks and a small cache, so the reused solver also exercises block growth and the
    // uncached fallback.
    let mut reused = Pather::with_capacity(&map, 16, 2);
    let mut fresh = Pather::with_capacity(&map, 16, 2);

    for &(start, end) in &endpoints {
        fresh.reset();
        let expected = fresh.find_path(start, end).unwrap();
        let actual = reused.find_path(start, end).unwrap();
        assert_eq!(actual, expected, "{start:?} -> {end:?}");
        if expected.is_some() && start != end {
            assert_eq!(reused.checksum(), fresh.checksum());
        }
    }
    assert_eq!(reused.frame() as usize, endpoints.iter().filter(|(a, b)| a != b).count());
}

#[test]
fn test_policies_agree_on_consistent_heuristics() {
    let map = common::random_map(3, 20, 20, EIGHT_CONNECTED);
    let endpoints = common::random_endpoints(3, &map, 20);
    let configs = [
        PatherConfig::new(32, 8),
        PatherConfig::new(32, 8).with_neighbor_cache(NeighborCache::Growable),
        PatherConfig::new(32, 8).with_closed_improvement(ClosedImprovement::Reopen),
    ];

    for &(start, end) in &endpoints {
        let costs: Vec<_> = configs
            .iter()
            .map(|&config| {
                let mut pather = Pather::new(&map, config);
                pather.find_path(start, end).unwrap().map(|(_, cost)| cost)
            })
            .collect();
        for cost in &costs[1..] {
            match (costs[0], *cost) {
                (Some(a), Some(b)) => assert!(approx_eq(a, b)),
                (a, b) => assert_eq!(a, b),
            }
        }
    }
}

#[test]
fn test_near_states_on_grid() {
    let map = GridGraph::uniform(5, 5, FOUR_CONNECTED);
    let mut pather = Pather::with_capacity(&map, 25, 4);
    let mut near = vec![];
    pather.solve_for_near_states((2, 2), &mut near, 2.0).unwrap();

    // Diamond of radius 2.
    assert_eq!(near.len(), 13);
    assert_eq!(near[0], StateCost::new((2, 2), 0.0));
    assert!(near.windows(2).all(|w| w[0].cost <= w[1].cost));
    for sc in &near {
        let (x, y) = sc.state;
        assert_eq!(sc.cost, ((x - 2).abs() + (y - 2).abs()) as f32);
    }

    // Searching afterwards is unaffected.
    let (_, cost) = pather.find_path((0, 0), (4, 4)).unwrap().unwrap();
    assert_eq!(cost, 8.0);
}

#[test]
fn test_road_map_route() {
    let text = "\
##.....
..#....
..#....
...###.
......#
";
    let map = RoadMap::parse(text, &['#']);
    let mut pather = Pather::with_capacity(&map, 16, 8);
    let (path, cost) = pather
        .find_path(Point16::new(0, 0), Point16::new(6, 4))
        .unwrap()
        .unwrap();

    assert_eq!(
        path,
        [
            Point16::new(0, 0),
            Point16::new(1, 0),
            Point16::new(2, 1),
            Point16::new(2, 2),
            Point16::new(3, 3),
            Point16::new(4, 3),
            Point16::new(5, 3),
            Point16::new(6, 4),
        ]
    );
    assert!(approx_eq(cost, 4.0 + 3.0 * DIAGONAL_COST));
}

#[test]
fn test_hex_grid_matches_dijkstra() {
    let mut map = HexGrid::new(12, 12, HexMetrics::new(1.0));
    for b in 0..10 {
        map.set_passable(HexPoint::new(5, b), false);
    }
    let start = HexPoint::new(1, 1);
    let end = HexPoint::new(10, 2);
    let expected = dijkstra(&map, start)[&end];

    let mut pather = Pather::with_capacity(&map, 144, 12);
    let (path, cost) = pather.find_path(start, end).unwrap().unwrap();
    assert!(approx_eq(cost, expected), "{cost} != {expected}");
    assert!(approx_eq(path_cost(&map, &path), cost));
    assert!(path.iter().all(|&p| map.is_passable(p)));
}

#[test]
fn test_text_map_search() {
    let text = "\
type octile
height 4
width 6
map
......
.@@@@.
.@..@.
......
";
    let map = read_grid_map(text.as_bytes()).unwrap();
    let mut pather = Pather::with_capacity(&map, 24, 8);
    let (path, cost) = pather.find_path((0, 0), (3, 2)).unwrap().unwrap();

    assert_eq!(path.last(), Some(&(3, 2)));
    assert!(approx_eq(cost, path_cost(&map, &path)));
    assert!(approx_eq(cost, dijkstra(&map, (0, 0))[&(3, 2)]));
}
