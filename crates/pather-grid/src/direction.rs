use enumset::{enum_set, EnumSet, EnumSetType};

/// Compass direction on a grid. North is towards negative `y`.
#[derive(EnumSetType, Debug)]
pub enum Direction {
    North,
    West,
    South,
    East,
    NorthWest,
    SouthWest,
    SouthEast,
    NorthEast,
}

/// The set of moves a grid graph allows.
pub type Connectivity = EnumSet<Direction>;

pub const FOUR_CONNECTED: Connectivity =
    enum_set!(Direction::North | Direction::West | Direction::South | Direction::East);

pub const DIAGONALS: Connectivity = enum_set!(
    Direction::NorthWest | Direction::SouthWest | Direction::SouthEast | Direction::NorthEast
);

pub const EIGHT_CONNECTED: Connectivity = enum_set!(
    Direction::North
        | Direction::West
        | Direction::South
        | Direction::East
        | Direction::NorthWest
        | Direction::SouthWest
        | Direction::SouthEast
        | Direction::NorthEast
);

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::NorthEast => (1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        DIAGONALS.contains(self)
    }

    /// The two orthogonal moves a diagonal move passes between.
    pub fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            _ => None,
        }
    }
}
