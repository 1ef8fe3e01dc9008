use std::cmp::Ordering;
use std::hash::BuildHasher;

use ahash::RandomState;

use crate::config::NeighborCache;
use crate::error::{PathError, Result};
use crate::node::{NodeCost, NodeId, PathNode};
use crate::traits::PathState;

// Fixed seeds keep bucket placement, and therefore search order, identical between runs.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Snapshot of the pool's memory use, for tuning `allocate` and `typical_adjacent`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Path nodes handed out since the last reset.
    pub allocated: usize,
    /// Node blocks currently held.
    pub blocks: usize,
    /// Nodes per block.
    pub block_size: usize,
    /// Number of hash buckets.
    pub hash_buckets: usize,
    /// Buckets holding at least one node.
    pub occupied_buckets: usize,
    /// Buckets holding more than one node.
    pub colliding_buckets: usize,
    /// Neighbor cache entries in use.
    pub cache_len: usize,
    /// Neighbor cache entries available before the cache counts as full.
    pub cache_capacity: usize,
}

/// Frame-aware storage for the [`PathNode`]s of a solver.
///
/// Nodes live in blocks of `allocate` nodes and are addressed by [`NodeId`]. A node is never
/// freed individually; when a later search revisits its state, the node is reinitialized in place
/// if its frame is stale. Everything is reclaimed at once by [`PathNodePool::clear`].
pub(crate) struct PathNodePool<S> {
    allocate: usize,
    blocks: Vec<Vec<PathNode<S>>>,
    allocated: usize,

    hash_shift: u32,
    hash_table: Vec<Option<NodeId>>,
    hasher: RandomState,

    cache: Vec<NodeCost>,
    cache_capacity: usize,
    cache_policy: NeighborCache,
    cache_full: bool,
}

impl<S: PathState> PathNodePool<S> {
    pub fn new(allocate: u32, typical_adjacent: u32, cache_policy: NeighborCache) -> Self {
        let allocate = allocate as usize;

        // At least as many buckets as states in a block, so a block's worth of states mostly
        // lands in distinct buckets.
        let mut hash_shift = 3;
        while 1usize << hash_shift < allocate {
            hash_shift += 1;
        }

        PathNodePool {
            allocate,
            blocks: vec![],
            allocated: 0,
            hash_shift,
            hash_table: vec![],
            hasher: RandomState::with_seeds(
                HASH_SEEDS[0],
                HASH_SEEDS[1],
                HASH_SEEDS[2],
                HASH_SEEDS[3],
            ),
            cache: vec![],
            cache_capacity: allocate * typical_adjacent as usize,
            cache_policy,
            cache_full: false,
        }
    }

    #[inline(always)]
    fn hash_size(&self) -> usize {
        1 << self.hash_shift
    }

    #[inline(always)]
    fn hash_mask(&self) -> usize {
        self.hash_size() - 1
    }

    #[inline(always)]
    fn bucket(&self, state: &S) -> usize {
        self.hasher.hash_one(state.state_bits()) as usize & self.hash_mask()
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &PathNode<S> {
        let index = id.index();
        &self.blocks[index / self.allocate][index % self.allocate]
    }

    #[inline(always)]
    pub fn node_mut(&mut self, id: NodeId) -> &mut PathNode<S> {
        let index = id.index();
        &mut self.blocks[index / self.allocate][index % self.allocate]
    }

    /// Returns the node for `state`, creating or reinitializing it as needed.
    ///
    /// If the node already exists and belongs to `frame`, it is returned as is and the remaining
    /// arguments are ignored. Otherwise the returned node is initialized from them.
    pub fn get_path_node(
        &mut self,
        frame: u32,
        state: S,
        cost_from_start: f32,
        est_to_goal: f32,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        self.ensure_hash_table()?;
        let key = self.bucket(&state);

        let mut insert_at = None;
        let mut cursor = self.hash_table[key];
        while let Some(id) = cursor {
            let node = self.node_mut(id);
            let dir = match state.cmp(&node.state) {
                Ordering::Equal => {
                    if node.frame != frame {
                        node.init(frame, cost_from_start, est_to_goal, parent);
                    }
                    return Ok(id);
                }
                Ordering::Less => 0,
                Ordering::Greater => 1,
            };
            insert_at = Some((id, dir));
            cursor = node.child[dir];
        }

        let id = self.alloc(PathNode::new(
            frame,
            state,
            cost_from_start,
            est_to_goal,
            parent,
        ))?;
        match insert_at {
            Some((parent, dir)) => self.node_mut(parent).child[dir] = Some(id),
            None => self.hash_table[key] = Some(id),
        }
        Ok(id)
    }

    fn ensure_hash_table(&mut self) -> Result<()> {
        if self.hash_table.is_empty() {
            let buckets = self.hash_size();
            self.hash_table
                .try_reserve_exact(buckets)
                .map_err(|source| PathError::HashAllocation { buckets, source })?;
            self.hash_table.resize(buckets, None);
        }
        Ok(())
    }

    fn alloc(&mut self, node: PathNode<S>) -> Result<NodeId> {
        let index = self.allocated;
        let id = NodeId::from_index(index).ok_or(PathError::IndexSpaceExhausted(index))?;

        let block = index / self.allocate;
        if block == self.blocks.len() {
            let nodes = self.allocate;
            let mut new_block = Vec::new();
            new_block
                .try_reserve_exact(nodes)
                .and_then(|()| self.blocks.try_reserve(1))
                .map_err(|source| PathError::NodeAllocation { nodes, source })?;
            self.blocks.push(new_block);
            tracing::trace!(blocks = self.blocks.len(), "allocated path node block");
        }

        self.blocks[block].push(node);
        self.allocated += 1;
        Ok(id)
    }

    /// Stores a neighbor list in the cache, returning its position.
    ///
    /// Returns `Ok(None)` if the list does not fit; the caller then has to recompute the
    /// neighbors whenever it needs them.
    pub fn push_cache(&mut self, nodes: &[NodeCost]) -> Result<Option<u32>> {
        let start = self.cache.len();
        let end = start + nodes.len();
        let Ok(index) = u32::try_from(start) else {
            return Ok(None);
        };

        match self.cache_policy {
            NeighborCache::Fixed => {
                if end > self.cache_capacity {
                    if !self.cache_full {
                        self.cache_full = true;
                        tracing::debug!(
                            capacity = self.cache_capacity,
                            "neighbor cache full, further neighbor lists will not be cached"
                        );
                    }
                    return Ok(None);
                }
                if self.cache.capacity() < self.cache_capacity {
                    let entries = self.cache_capacity;
                    self.cache
                        .try_reserve_exact(entries - start)
                        .map_err(|source| PathError::CacheAllocation { entries, source })?;
                }
            }
            NeighborCache::Growable => {
                self.cache
                    .try_reserve(nodes.len())
                    .map_err(|source| PathError::CacheAllocation {
                        entries: end,
                        source,
                    })?;
            }
        }

        self.cache.extend_from_slice(nodes);
        Ok(Some(index))
    }

    /// Copies a cached neighbor list into `nodes`.
    pub fn get_cache(&self, start: u32, len: u32, nodes: &mut Vec<NodeCost>) {
        let start = start as usize;
        debug_assert!(len > 0);
        debug_assert!(start + len as usize <= self.cache.len());
        nodes.clear();
        nodes.extend_from_slice(&self.cache[start..start + len as usize]);
    }

    /// Appends the states of every node initialized in `frame`, or only the closed ones.
    pub fn all_states(&self, frame: u32, states: &mut Vec<S>, include_all: bool) {
        states.extend(
            self.blocks
                .iter()
                .flatten()
                .filter(|node| node.frame == frame && (include_all || node.in_closed))
                .map(|node| node.state),
        );
    }

    /// Returns every node to the pool, keeping the first block (and the hash table) allocated.
    pub fn clear(&mut self) {
        self.blocks.truncate(1);
        if let Some(first) = self.blocks.first_mut() {
            first.clear();
        }
        if self.allocated > 0 {
            self.hash_table.fill(None);
        }
        self.allocated = 0;

        self.cache.clear();
        self.cache.shrink_to(self.cache_capacity);
        self.cache_full = false;
    }

    pub fn stats(&self) -> PoolStats {
        let mut occupied_buckets = 0;
        let mut colliding_buckets = 0;
        for &root in self.hash_table.iter().flatten() {
            occupied_buckets += 1;
            if self.node(root).child.iter().any(Option::is_some) {
                colliding_buckets += 1;
            }
        }

        PoolStats {
            allocated: self.allocated,
            blocks: self.blocks.len(),
            block_size: self.allocate,
            hash_buckets: self.hash_size(),
            occupied_buckets,
            colliding_buckets,
            cache_len: self.cache.len(),
            cache_capacity: self.cache_capacity,
        }
    }
}
