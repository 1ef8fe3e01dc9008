use crate::node::{Link, NodeId};
use crate::node_pool::PathNodePool;
use crate::traits::PathState;

/// Frontier of a search: the open nodes, sorted by ascending `(total_cost, est_to_goal)`.
///
/// The list is threaded through the `prev`/`next` links of the pool's nodes, so the queue itself
/// only holds the links of the sentinel. The sentinel sorts after every node, including nodes
/// whose total cost saturated to `f32::MAX`.
pub(crate) struct OpenQueue {
    head: Link,
    tail: Link,
    len: usize,
}

type Key = (f32, f32);

const SENTINEL_KEY: Key = (f32::MAX, f32::MAX);

/// Whether a node with key `a` belongs strictly before a node with key `b`. Ties on total cost
/// go to the node closer to the goal.
#[inline(always)]
fn precedes(a: Key, b: Key) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
}

impl OpenQueue {
    pub fn new() -> Self {
        OpenQueue {
            head: Link::Sentinel,
            tail: Link::Sentinel,
            len: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == Link::Sentinel
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts `id` in sorted position.
    pub fn push<S: PathState>(&mut self, pool: &mut PathNodePool<S>, id: NodeId) {
        let node = pool.node(id);
        debug_assert!(!node.in_open && !node.in_closed);

        let key = (node.total_cost, node.est_to_goal);
        let mut it = self.head;
        while it != Link::Sentinel && !precedes(key, Self::key(pool, it)) {
            it = self.next_of(pool, it);
        }
        self.add_before(pool, it, id);
        pool.node_mut(id).in_open = true;
        self.len += 1;

        #[cfg(any(test, feature = "debug-validation"))]
        self.check_list(pool);
    }

    /// Removes and returns the cheapest node.
    pub fn pop<S: PathState>(&mut self, pool: &mut PathNodePool<S>) -> Option<NodeId> {
        let Link::Node(id) = self.head else {
            return None;
        };
        self.unlink(pool, id);
        let node = pool.node_mut(id);
        debug_assert!(node.in_open && !node.in_closed);
        node.in_open = false;
        self.len -= 1;

        #[cfg(any(test, feature = "debug-validation"))]
        self.check_list(pool);

        Some(id)
    }

    /// Restores the ordering after the cost of `id`, which must be open, has changed.
    ///
    /// The node is shifted locally towards the head if it became cheaper than its predecessor,
    /// or towards the tail if it became more expensive than its successor.
    pub fn update<S: PathState>(&mut self, pool: &mut PathNodePool<S>, id: NodeId) {
        let node = pool.node(id);
        debug_assert!(node.in_open);
        let key = (node.total_cost, node.est_to_goal);
        let (prev, next) = (node.prev, node.next);

        if prev != Link::Sentinel && precedes(key, Self::key(pool, prev)) {
            let mut it = self.prev_of(pool, prev);
            while it != Link::Sentinel && precedes(key, Self::key(pool, it)) {
                it = self.prev_of(pool, it);
            }
            self.unlink(pool, id);
            let at = self.next_of(pool, it);
            self.add_before(pool, at, id);
        } else if next != Link::Sentinel && precedes(Self::key(pool, next), key) {
            let mut it = self.next_of(pool, next);
            while it != Link::Sentinel && precedes(Self::key(pool, it), key) {
                it = self.next_of(pool, it);
            }
            self.unlink(pool, id);
            self.add_before(pool, it, id);
        }

        #[cfg(any(test, feature = "debug-validation"))]
        self.check_list(pool);
    }

    #[inline(always)]
    fn key<S: PathState>(pool: &PathNodePool<S>, link: Link) -> Key {
        match link {
            Link::Sentinel => SENTINEL_KEY,
            Link::Node(id) => {
                let node = pool.node(id);
                (node.total_cost, node.est_to_goal)
            }
        }
    }

    #[inline(always)]
    fn next_of<S: PathState>(&self, pool: &PathNodePool<S>, link: Link) -> Link {
        match link {
            Link::Sentinel => self.head,
            Link::Node(id) => pool.node(id).next,
        }
    }

    #[inline(always)]
    fn prev_of<S: PathState>(&self, pool: &PathNodePool<S>, link: Link) -> Link {
        match link {
            Link::Sentinel => self.tail,
            Link::Node(id) => pool.node(id).prev,
        }
    }

    #[inline(always)]
    fn set_next<S: PathState>(&mut self, pool: &mut PathNodePool<S>, link: Link, to: Link) {
        match link {
            Link::Sentinel => self.head = to,
            Link::Node(id) => pool.node_mut(id).next = to,
        }
    }

    #[inline(always)]
    fn set_prev<S: PathState>(&mut self, pool: &mut PathNodePool<S>, link: Link, to: Link) {
        match link {
            Link::Sentinel => self.tail = to,
            Link::Node(id) => pool.node_mut(id).prev = to,
        }
    }

    fn unlink<S: PathState>(&mut self, pool: &mut PathNodePool<S>, id: NodeId) {
        let node = pool.node_mut(id);
        let (prev, next) = (node.prev, node.next);
        node.prev = Link::Sentinel;
        node.next = Link::Sentinel;
        self.set_prev(pool, next, prev);
        self.set_next(pool, prev, next);
    }

    fn add_before<S: PathState>(&mut self, pool: &mut PathNodePool<S>, at: Link, id: NodeId) {
        let prev = self.prev_of(pool, at);
        let node = pool.node_mut(id);
        node.next = at;
        node.prev = prev;
        self.set_next(pool, prev, Link::Node(id));
        self.set_prev(pool, at, Link::Node(id));
    }

    #[cfg(any(test, feature = "debug-validation"))]
    fn check_list<S: PathState>(&self, pool: &PathNodePool<S>) {
        let mut count = 0;
        let mut prev = Link::Sentinel;
        let mut it = self.head;
        while let Link::Node(id) = it {
            let node = pool.node(id);
            assert!(node.in_open, "closed or detached node in open queue");
            assert_eq!(node.prev, prev, "broken open queue back link");
            assert!(
                !precedes(Self::key(pool, it), Self::key(pool, prev)) || prev == Link::Sentinel,
                "open queue out of order"
            );
            count += 1;
            prev = it;
            it = node.next;
        }
        assert_eq!(self.tail, prev, "broken open queue tail");
        assert_eq!(count, self.len, "open queue length mismatch");
    }
}
