/// What the neighbor cache does once its capacity is used up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborCache {
    /// The cache holds `allocate * typical_adjacent` entries. Once full, neighbor lists that do
    /// not fit are recomputed from the graph on every visit until the next reset.
    #[default]
    Fixed,
    /// The cache grows on demand, so every neighbor list is computed at most once per reset.
    Growable,
}

/// What happens when a node that is already closed is reached through a cheaper path.
///
/// This can only happen when the heuristic is inconsistent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClosedImprovement {
    /// Record the cheaper cost and parent, but do not expand the node again.
    #[default]
    Keep,
    /// As [`ClosedImprovement::Keep`], and emit a warning through `tracing`.
    Warn,
    /// Move the node back to the open queue so that it is expanded again. Paths stay optimal
    /// with admissible but inconsistent heuristics, at the price of extra expansions.
    Reopen,
}

/// Tuning knobs for a [`Pather`](crate::Pather).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatherConfig {
    /// Number of path nodes allocated per block. The state hash table gets at least this many
    /// buckets. For small maps, the total number of states is a good choice; for large maps,
    /// a quarter of the states.
    pub allocate: u32,
    /// Typical number of neighbors of a state; sizes the neighbor cache.
    pub typical_adjacent: u32,
    /// Behavior of the neighbor cache when full.
    pub neighbor_cache: NeighborCache,
    /// Behavior when a closed node is improved.
    pub closed_improvement: ClosedImprovement,
}

impl Default for PatherConfig {
    fn default() -> Self {
        PatherConfig {
            allocate: 250,
            typical_adjacent: 6,
            neighbor_cache: NeighborCache::Fixed,
            closed_improvement: ClosedImprovement::Keep,
        }
    }
}

impl PatherConfig {
    /// Config with the given sizing hints and default policies.
    pub fn new(allocate: u32, typical_adjacent: u32) -> Self {
        PatherConfig {
            allocate,
            typical_adjacent,
            ..Default::default()
        }
    }

    /// Sets the neighbor cache policy.
    pub fn with_neighbor_cache(mut self, neighbor_cache: NeighborCache) -> Self {
        self.neighbor_cache = neighbor_cache;
        self
    }

    /// Sets what happens when a closed node is reached more cheaply.
    pub fn with_closed_improvement(mut self, closed_improvement: ClosedImprovement) -> Self {
        self.closed_improvement = closed_improvement;
        self
    }

    /// Number of neighbor cache entries available before the cache is full.
    pub fn cache_capacity(&self) -> usize {
        self.allocate as usize * self.typical_adjacent as usize
    }

    #[track_caller]
    pub(crate) fn validate(&self) {
        assert!(self.allocate > 0, "allocate must be positive");
        assert!(self.typical_adjacent > 0, "typical_adjacent must be positive");
    }
}
