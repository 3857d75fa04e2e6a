//! Integer grid coordinates.

use serde::{Deserialize, Serialize};

/// A tile coordinate on the map grid.
///
/// `x` runs along the map width, `y` along the map height. Coordinates are
/// plain values: two coordinates are the same tile when both components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours (left, right, down, up).
    ///
    /// Neighbours may lie outside any particular grid; callers bounds-check.
    #[must_use]
    pub const fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
        ]
    }

    /// Whether the coordinate lies inside a `width` x `height` grid.
    #[must_use]
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
