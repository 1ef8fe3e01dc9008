use crate::traits::PathState;

/// Index of a [`PathNode`] within its pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index)
            .ok()
            .filter(|&i| i != u32::MAX)
            .map(NodeId)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Link in the open queue. The sentinel terminates the list in both directions and compares
/// greater than every real node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Link {
    Sentinel,
    Node(NodeId),
}

/// A neighbor resolved to its pool node.
#[derive(Copy, Clone, Debug)]
pub(crate) struct NodeCost {
    pub node: NodeId,
    pub cost: f32,
}

/// Every state touched by a search is represented by exactly one `PathNode` in the pool.
#[derive(Clone, Debug)]
pub(crate) struct PathNode<S> {
    pub state: S,
    pub cost_from_start: f32,
    pub est_to_goal: f32,
    pub total_cost: f32,
    pub parent: Option<NodeId>,
    /// Search generation that last initialized this node. Anything else is stale.
    pub frame: u32,

    /// `None` until the neighbors have been queried once.
    pub num_adjacent: Option<u32>,
    /// Position of the neighbor list in the pool's neighbor cache, if it fit.
    pub cache_index: Option<u32>,

    /// Binary search tree within the hash bucket. [less, greater-or-equal]
    pub child: [Option<NodeId>; 2],
    pub prev: Link,
    pub next: Link,

    pub in_open: bool,
    pub in_closed: bool,
}

impl<S: PathState> PathNode<S> {
    pub fn new(
        frame: u32,
        state: S,
        cost_from_start: f32,
        est_to_goal: f32,
        parent: Option<NodeId>,
    ) -> Self {
        let mut node = PathNode {
            state,
            cost_from_start,
            est_to_goal,
            total_cost: f32::MAX,
            parent,
            frame,
            num_adjacent: None,
            cache_index: None,
            child: [None, None],
            prev: Link::Sentinel,
            next: Link::Sentinel,
            in_open: false,
            in_closed: false,
        };
        node.calc_total_cost();
        node
    }

    /// Reinitialize a node left over from an earlier frame.
    ///
    /// The cached neighbor list and the bucket tree links survive; they do not depend on the
    /// frame.
    pub fn init(
        &mut self,
        frame: u32,
        cost_from_start: f32,
        est_to_goal: f32,
        parent: Option<NodeId>,
    ) {
        self.cost_from_start = cost_from_start;
        self.est_to_goal = est_to_goal;
        self.calc_total_cost();
        self.parent = parent;
        self.frame = frame;
        self.in_open = false;
        self.in_closed = false;
    }

    pub fn relax(&mut self, parent: NodeId, cost_from_start: f32, est_to_goal: f32) {
        self.parent = Some(parent);
        self.cost_from_start = cost_from_start;
        self.est_to_goal = est_to_goal;
        self.calc_total_cost();
    }

    #[inline(always)]
    pub fn calc_total_cost(&mut self) {
        self.total_cost = if self.cost_from_start < f32::MAX && self.est_to_goal < f32::MAX {
            self.cost_from_start + self.est_to_goal
        } else {
            f32::MAX
        };
    }
}
