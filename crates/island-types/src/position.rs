//! Grid coordinates, compass directions, and rectangular bounds.
//!
//! The island lives on an integer grid where `x` grows to the east and `y`
//! grows to the north. [`Position`] orders by `(x, y)`, which is the order
//! every whole-grid pass walks the map in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An integer cell coordinate on the island grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column, growing eastward.
    pub x: i32,
    /// Row, growing northward.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one cell in the given direction.
    ///
    /// Coordinates saturate at the `i32` range instead of wrapping.
    pub const fn step(self, direction: Direction8) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub const fn chebyshev(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// The eight surrounding positions in [`Direction8::ALL`] order.
    pub fn neighbors8(self) -> impl Iterator<Item = Self> {
        Direction8::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Direction8 {
    /// `(0, 1)`
    North,
    /// `(1, 1)`
    NorthEast,
    /// `(1, 0)`
    East,
    /// `(1, -1)`
    SouthEast,
    /// `(0, -1)`
    South,
    /// `(-1, -1)`
    SouthWest,
    /// `(-1, 0)`
    West,
    /// `(-1, 1)`
    NorthWest,
}

impl Direction8 {
    /// All eight directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// The unit `(dx, dy)` delta for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::NorthEast => (1, 1),
            Self::East => (1, 0),
            Self::SouthEast => (1, -1),
            Self::South => (0, -1),
            Self::SouthWest => (-1, -1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, 1),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// The compass direction whose delta matches the sign of the
    /// displacement from `from` to `to`, or `None` when they coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = to.x.saturating_sub(from.x).signum();
        let dy = to.y.saturating_sub(from.y).signum();
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

/// An inclusive, axis-aligned rectangle of grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bounds {
    /// Westmost column.
    pub min_x: i32,
    /// Eastmost column.
    pub max_x: i32,
    /// Southmost row.
    pub min_y: i32,
    /// Northmost row.
    pub max_y: i32,
}

impl Bounds {
    /// Create bounds from inclusive ranges.
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Whether the minimum corner does not exceed the maximum corner.
    pub const fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Whether `position` lies inside (edges included).
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Whether `other` lies entirely inside these bounds.
    pub const fn encloses(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Number of columns, or zero for inverted bounds.
    pub const fn width(&self) -> u32 {
        if self.is_valid() {
            self.max_x.abs_diff(self.min_x).saturating_add(1)
        } else {
            0
        }
    }

    /// Number of rows, or zero for inverted bounds.
    pub const fn height(&self) -> u32 {
        if self.is_valid() {
            self.max_y.abs_diff(self.min_y).saturating_add(1)
        } else {
            0
        }
    }

    /// Every position inside, ordered by `(x, y)`.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let Self {
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;
        (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| Position::new(x, y)))
    }
}
