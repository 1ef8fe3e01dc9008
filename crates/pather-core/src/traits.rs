use std::fmt::Debug;
use std::ptr::NonNull;

/// A caller-defined search state.
///
/// States are never interpreted by the solver. Two states are the same state iff `==` says so,
/// and `Ord` is used to arrange states that land in the same hash bucket. `state_bits` reduces
/// the state to an integer; it is used for bucket selection and for the path checksum, so equal
/// states must produce equal bits.
pub trait PathState: Copy + Eq + Ord + Debug {
    /// Integer reduction of the state.
    fn state_bits(&self) -> u64;
}

/// The cost of moving to `state` from some other state.
///
/// A cost of `f32::MAX` (or anything at least that large, including infinity) means the
/// transition is impassable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateCost<S> {
    /// The neighboring state.
    pub state: S,
    /// Cost of the transition.
    pub cost: f32,
}

impl<S> StateCost<S> {
    /// Pairs a neighbor with the cost of moving to it.
    pub fn new(state: S, cost: f32) -> Self {
        StateCost { state, cost }
    }

    /// Whether the transition can actually be taken.
    pub fn is_passable(&self) -> bool {
        is_passable(self.cost)
    }
}

#[inline(always)]
pub(crate) fn is_passable(cost: f32) -> bool {
    cost < f32::MAX
}

/// The graph being searched.
///
/// Implementations must return identical results for identical inputs for the lifetime of a
/// search; the solver caches neighbor lists and will replay them on later visits (and across
/// searches, until [`Pather::reset`](crate::Pather::reset) is called).
pub trait Graph {
    /// The state type of this graph.
    type State: PathState;

    /// Lower bound on the cost of travelling from `start` to `end`.
    ///
    /// Paths are only guaranteed to be optimal if this never overestimates.
    fn least_cost_estimate(&self, start: Self::State, end: Self::State) -> f32;

    /// Appends the neighbors of `state` and the cost of moving to each of them.
    ///
    /// A state must never be listed as its own neighbor.
    fn adjacent_cost(&self, state: Self::State, adjacent: &mut Vec<StateCost<Self::State>>);

    /// Human readable description of a state, used in trace logging.
    fn print_state_info(&self, state: Self::State) -> String {
        format!("{state:?}")
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    type State = G::State;

    #[inline(always)]
    fn least_cost_estimate(&self, start: Self::State, end: Self::State) -> f32 {
        (**self).least_cost_estimate(start, end)
    }

    #[inline(always)]
    fn adjacent_cost(&self, state: Self::State, adjacent: &mut Vec<StateCost<Self::State>>) {
        (**self).adjacent_cost(state, adjacent)
    }

    fn print_state_info(&self, state: Self::State) -> String {
        (**self).print_state_info(state)
    }
}

macro_rules! int_state_impl {
    ($($typ:ty)*) => {
        $(
            impl PathState for $typ {
                #[inline(always)]
                fn state_bits(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

int_state_impl!(u8 u16 u32 u64 usize i8 i16 i32 i64 isize);

macro_rules! pair_state_impl {
    ($($typ:ty, $unsigned:ty, $bits:literal;)*) => {
        $(
            impl PathState for ($typ, $typ) {
                #[inline(always)]
                fn state_bits(&self) -> u64 {
                    (self.1 as $unsigned as u64) << $bits | self.0 as $unsigned as u64
                }
            }
        )*
    };
}

pair_state_impl! {
    i16, u16, 16;
    u16, u16, 16;
    i32, u32, 32;
    u32, u32, 32;
}

/// Pointers to caller-owned graph nodes are compared, ordered and hashed by address.
impl<T: ?Sized> PathState for *const T {
    #[inline(always)]
    fn state_bits(&self) -> u64 {
        self.cast::<()>() as usize as u64
    }
}

impl<T: ?Sized> PathState for NonNull<T> {
    #[inline(always)]
    fn state_bits(&self) -> u64 {
        self.as_ptr().cast::<()>() as usize as u64
    }
}
