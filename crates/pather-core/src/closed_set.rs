use crate::node::NodeId;
use crate::node_pool::PathNodePool;
use crate::traits::PathState;

/// Finalized nodes. Membership is the `in_closed` flag of the node itself.
pub(crate) struct ClosedSet;

impl ClosedSet {
    #[inline(always)]
    pub fn add<S: PathState>(pool: &mut PathNodePool<S>, id: NodeId) {
        let node = pool.node_mut(id);
        debug_assert!(!node.in_closed, "node closed twice");
        debug_assert!(!node.in_open, "closing a node that is still open");
        node.in_closed = true;
    }

    #[inline(always)]
    pub fn remove<S: PathState>(pool: &mut PathNodePool<S>, id: NodeId) {
        let node = pool.node_mut(id);
        debug_assert!(node.in_closed, "removing a node that is not closed");
        debug_assert!(!node.in_open);
        node.in_closed = false;
    }
}
