use crate::closed_set::ClosedSet;
use crate::config::{ClosedImprovement, PatherConfig};
use crate::error::Result;
use crate::node::{NodeCost, NodeId};
use crate::node_pool::{PathNodePool, PoolStats};
use crate::open_queue::OpenQueue;
use crate::traits::{is_passable, Graph, PathState, StateCost};

/// Outcome of [`Pather::solve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SolveStatus {
    /// A path was found. `cost` is the accumulated cost from start to end.
    Solved {
        /// Cost of the path.
        cost: f32,
    },
    /// The end state is not reachable from the start state.
    NoSolution,
    /// Start and end are the same state; no search was performed.
    StartEndSame,
}

impl SolveStatus {
    /// Cost of the path, or 0 if there is none.
    pub fn cost(&self) -> f32 {
        match *self {
            SolveStatus::Solved { cost } => cost,
            SolveStatus::NoSolution | SolveStatus::StartEndSame => 0.0,
        }
    }

    /// Whether a path was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Solved { .. })
    }
}

/// A* path solver over a caller supplied [`Graph`].
///
/// The solver keeps its node pool and neighbor cache between calls. Consecutive searches on the
/// same graph reuse them without any clearing; stale nodes are recognized by their frame stamp.
/// If the graph changes in a way that alters neighbors or costs, call [`Pather::reset`] before
/// the next search.
///
/// A `Pather` is not shareable between threads while searching (every method that searches takes
/// `&mut self`), but independent solvers can run concurrently over the same read-only graph by
/// giving each a `&G`.
pub struct Pather<G: Graph> {
    graph: G,
    config: PatherConfig,
    pool: PathNodePool<G::State>,
    frame: u32,
    checksum: u64,
    state_costs: Vec<StateCost<G::State>>,
    node_costs: Vec<NodeCost>,
}

impl<G: Graph> Pather<G> {
    /// Creates a solver. No memory is allocated until the first search.
    ///
    /// # Panics
    ///
    /// Panics if `config.allocate` or `config.typical_adjacent` is zero.
    #[track_caller]
    pub fn new(graph: G, config: PatherConfig) -> Self {
        config.validate();
        Pather {
            pool: PathNodePool::new(
                config.allocate,
                config.typical_adjacent,
                config.neighbor_cache,
            ),
            graph,
            config,
            frame: 0,
            checksum: 0,
            state_costs: vec![],
            node_costs: vec![],
        }
    }

    /// Creates a solver with the given sizing hints and default policies.
    ///
    /// See [`PatherConfig::allocate`] and [`PatherConfig::typical_adjacent`].
    #[track_caller]
    pub fn with_capacity(graph: G, allocate: u32, typical_adjacent: u32) -> Self {
        Self::new(graph, PatherConfig::new(allocate, typical_adjacent))
    }

    /// The graph being searched.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// The configuration this solver was built with.
    pub fn config(&self) -> &PatherConfig {
        &self.config
    }

    /// Generation of the most recent search. 0 before the first search and after a reset.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Fingerprint of the last path found, for comparing runs. Not a correctness guarantee.
    pub fn checksum(&self) -> u64 {
        self.checksum
    }

    /// Node pool and neighbor cache usage.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Releases all memory beyond the first node block and forgets every cached node and
    /// neighbor list.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.frame = 0;
        self.checksum = 0;
    }

    /// Replaces the contents of `states` with the states touched by the most recent search.
    ///
    /// With `include_all` false, only the states that were closed (expanded) are listed.
    pub fn states_in_pool(&self, states: &mut Vec<G::State>, include_all: bool) {
        states.clear();
        self.pool.all_states(self.frame, states, include_all);
    }

    fn next_frame(&mut self) {
        if self.frame == u32::MAX {
            tracing::info!("search frame counter wrapped, clearing path node pool");
            self.pool.clear();
            self.frame = 0;
        }
        self.frame += 1;
    }

    /// Finds a minimum cost path from `start` to `end`.
    ///
    /// On [`SolveStatus::Solved`], `path` is replaced by the states of the path, beginning with
    /// `start` and ending with `end`. On [`SolveStatus::NoSolution`] it is cleared. On
    /// [`SolveStatus::StartEndSame`] it is left untouched.
    ///
    /// The path is optimal if [`Graph::least_cost_estimate`] never overestimates. Errors are only
    /// returned when the node pool cannot allocate.
    pub fn solve(
        &mut self,
        start: G::State,
        end: G::State,
        path: &mut Vec<G::State>,
    ) -> Result<SolveStatus> {
        if start == end {
            return Ok(SolveStatus::StartEndSame);
        }

        self.next_frame();
        let _span = tracing::debug_span!("solve", frame = self.frame).entered();

        let Pather {
            graph,
            config,
            pool,
            frame,
            checksum,
            state_costs,
            node_costs,
        } = self;
        let frame = *frame;

        tracing::debug!(
            start = %graph.print_state_info(start),
            end = %graph.print_state_info(end),
            estimate = graph.least_cost_estimate(start, end),
            "searching"
        );

        let mut open = OpenQueue::new();
        let start_node = pool.get_path_node(
            frame,
            start,
            0.0,
            graph.least_cost_estimate(start, end),
            None,
        )?;
        open.push(pool, start_node);

        while let Some(id) = open.pop(pool) {
            let node = pool.node(id);
            tracing::trace!(
                state = %graph.print_state_info(node.state),
                total_cost = node.total_cost,
                open = open.len(),
                "pop"
            );

            if node.state == end {
                let cost = node.cost_from_start;
                *checksum = goal_reached(pool, id, start, end, path);
                tracing::debug!(cost, len = path.len(), checksum = *checksum, "goal reached");
                return Ok(SolveStatus::Solved { cost });
            }

            ClosedSet::add(pool, id);
            node_neighbors(graph, pool, frame, id, state_costs, node_costs)?;

            let cost_from_start = pool.node(id).cost_from_start;
            for &NodeCost { node: child, cost } in node_costs.iter() {
                if !is_passable(cost) {
                    continue;
                }
                let new_cost = cost_from_start + cost;

                let neighbor = pool.node(child);
                debug_assert!(child != id);
                debug_assert!(!(neighbor.in_open && neighbor.in_closed));
                let (in_open, in_closed) = (neighbor.in_open, neighbor.in_closed);

                if in_open || in_closed {
                    if new_cost >= neighbor.cost_from_start {
                        continue;
                    }
                    let state = neighbor.state;
                    let estimate = graph.least_cost_estimate(state, end);
                    pool.node_mut(child).relax(id, new_cost, estimate);

                    if in_open {
                        open.update(pool, child);
                        tracing::trace!(state = %graph.print_state_info(state), new_cost, "update");
                        continue;
                    }
                    match config.closed_improvement {
                        ClosedImprovement::Keep => {
                            tracing::trace!(
                                state = %graph.print_state_info(state),
                                new_cost,
                                "closed node improved"
                            );
                        }
                        ClosedImprovement::Warn => {
                            tracing::warn!(
                                state = %graph.print_state_info(state),
                                new_cost,
                                "closed node improved, heuristic is inconsistent"
                            );
                        }
                        ClosedImprovement::Reopen => {
                            ClosedSet::remove(pool, child);
                            open.push(pool, child);
                            tracing::trace!(
                                state = %graph.print_state_info(state),
                                new_cost,
                                "closed node reopened"
                            );
                        }
                    }
                } else {
                    let state = neighbor.state;
                    let estimate = graph.least_cost_estimate(state, end);
                    pool.node_mut(child).relax(id, new_cost, estimate);
                    open.push(pool, child);
                    tracing::trace!(state = %graph.print_state_info(state), new_cost, "push");
                }
            }
        }

        path.clear();
        tracing::debug!("open queue exhausted, no solution");
        Ok(SolveStatus::NoSolution)
    }

    /// Convenience wrapper around [`Pather::solve`] returning an owned path and its cost.
    ///
    /// Returns `None` if `end` is unreachable. If `start == end`, the path is just `[start]`.
    pub fn find_path(
        &mut self,
        start: G::State,
        end: G::State,
    ) -> Result<Option<(Vec<G::State>, f32)>> {
        let mut path = vec![];
        Ok(match self.solve(start, end, &mut path)? {
            SolveStatus::Solved { cost } => Some((path, cost)),
            SolveStatus::StartEndSame => Some((vec![start], 0.0)),
            SolveStatus::NoSolution => None,
        })
    }

    /// Replaces the contents of `near` with every state reachable from `start` at a cost of at
    /// most `max_cost`, together with that cost.
    ///
    /// This is a Dijkstra flood that ignores the heuristic. States are listed in non-decreasing
    /// cost order, beginning with `start` at cost 0.
    pub fn solve_for_near_states(
        &mut self,
        start: G::State,
        near: &mut Vec<StateCost<G::State>>,
        max_cost: f32,
    ) -> Result<()> {
        near.clear();
        self.next_frame();
        let _span = tracing::debug_span!("solve_for_near_states", frame = self.frame).entered();

        let Pather {
            graph,
            pool,
            frame,
            state_costs,
            node_costs,
            ..
        } = self;
        let frame = *frame;

        let mut open = OpenQueue::new();
        let start_node = pool.get_path_node(frame, start, 0.0, 0.0, None)?;
        open.push(pool, start_node);

        while let Some(id) = open.pop(pool) {
            ClosedSet::add(pool, id);
            let node = pool.node(id);
            let cost_from_start = node.cost_from_start;
            if cost_from_start > max_cost {
                continue;
            }
            near.push(StateCost::new(node.state, cost_from_start));

            node_neighbors(graph, pool, frame, id, state_costs, node_costs)?;
            for &NodeCost { node: child, cost } in node_costs.iter() {
                if !is_passable(cost) {
                    continue;
                }
                let new_cost = cost_from_start + cost;

                let neighbor = pool.node(child);
                debug_assert!(child != id);
                if (neighbor.in_open || neighbor.in_closed) && neighbor.cost_from_start <= new_cost
                {
                    continue;
                }
                let in_open = neighbor.in_open;
                let in_closed = neighbor.in_closed;
                pool.node_mut(child).relax(id, new_cost, 0.0);
                if in_open {
                    open.update(pool, child);
                } else if !in_closed {
                    open.push(pool, child);
                }
            }
        }

        tracing::debug!(count = near.len(), max_cost, "near states collected");
        Ok(())
    }
}

/// Resolves the neighbors of node `id` into `node_costs`, from the neighbor cache if possible.
///
/// Neighbor nodes that belong to an earlier frame are reinitialized with infinite cost and no
/// parent.
fn node_neighbors<G: Graph>(
    graph: &G,
    pool: &mut PathNodePool<G::State>,
    frame: u32,
    id: NodeId,
    state_costs: &mut Vec<StateCost<G::State>>,
    node_costs: &mut Vec<NodeCost>,
) -> Result<()> {
    let node = pool.node(id);
    match (node.num_adjacent, node.cache_index) {
        (Some(0), _) => node_costs.clear(),
        (Some(len), Some(start)) => {
            pool.get_cache(start, len, node_costs);
            for nc in node_costs.iter() {
                let neighbor = pool.node_mut(nc.node);
                if neighbor.frame != frame {
                    neighbor.init(frame, f32::MAX, f32::MAX, None);
                }
            }
        }
        _ => {
            let state = node.state;
            state_costs.clear();
            graph.adjacent_cost(state, state_costs);
            debug_assert!(
                state_costs.iter().all(|sc| sc.state != state),
                "{} is listed as its own neighbor",
                graph.print_state_info(state)
            );

            node_costs.clear();
            for sc in state_costs.iter() {
                let node = pool.get_path_node(frame, sc.state, f32::MAX, f32::MAX, None)?;
                node_costs.push(NodeCost {
                    node,
                    cost: sc.cost,
                });
            }

            let num_adjacent = u32::try_from(node_costs.len()).ok();
            let cache_index = match num_adjacent {
                Some(n) if n > 0 => pool.push_cache(node_costs)?,
                _ => None,
            };
            let node = pool.node_mut(id);
            node.num_adjacent = num_adjacent;
            node.cache_index = cache_index;
        }
    }
    Ok(())
}

/// Writes the path ending at `goal` into `path` and returns its checksum.
fn goal_reached<S: PathState>(
    pool: &PathNodePool<S>,
    goal: NodeId,
    start: S,
    end: S,
    path: &mut Vec<S>,
) -> u64 {
    path.clear();
    let mut it = Some(goal);
    while let Some(id) = it {
        let node = pool.node(id);
        path.push(node.state);
        it = node.parent;
    }
    path.reverse();
    debug_assert!(path.len() >= 2);
    debug_assert!(path.first() == Some(&start) && path.last() == Some(&end));

    path.iter().enumerate().fold(0u64, |sum, (k, state)| {
        sum.wrapping_add(state.state_bits() << (k % 8))
    })
}
