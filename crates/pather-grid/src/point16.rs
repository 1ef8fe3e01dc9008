use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use pather_core::PathState;

/// Point of two signed 16-bit coordinates, packable into a single 32-bit integer.
///
/// Points are ordered by `b`, then by `a`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point16 {
    pub a: i16,
    pub b: i16,
}

impl Point16 {
    pub const fn new(a: i16, b: i16) -> Self {
        Point16 { a, b }
    }

    /// `b` in the high half, `a` in the low half.
    pub const fn pack(self) -> u32 {
        (self.b as u16 as u32) << 16 | self.a as u16 as u32
    }

    pub const fn unpack(packed: u32) -> Self {
        Point16 {
            a: packed as u16 as i16,
            b: (packed >> 16) as u16 as i16,
        }
    }

    /// Offsets the point, or returns `None` if a coordinate would overflow.
    pub fn checked_offset(self, da: i16, db: i16) -> Option<Self> {
        Some(Point16 {
            a: self.a.checked_add(da)?,
            b: self.b.checked_add(db)?,
        })
    }
}

impl Ord for Point16 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.b.cmp(&other.b).then(self.a.cmp(&other.a))
    }
}

impl PartialOrd for Point16 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Point16 {
    type Output = Point16;

    fn add(self, rhs: Point16) -> Point16 {
        Point16::new(self.a.wrapping_add(rhs.a), self.b.wrapping_add(rhs.b))
    }
}

impl Sub for Point16 {
    type Output = Point16;

    fn sub(self, rhs: Point16) -> Point16 {
        Point16::new(self.a.wrapping_sub(rhs.a), self.b.wrapping_sub(rhs.b))
    }
}

impl From<Point16> for (i32, i32) {
    fn from(p: Point16) -> (i32, i32) {
        (p.a as i32, p.b as i32)
    }
}

impl fmt::Display for Point16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

impl PathState for Point16 {
    #[inline(always)]
    fn state_bits(&self) -> u64 {
        self.pack() as u64
    }
}
