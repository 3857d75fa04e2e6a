//! Flat row-major grids indexed by [`Coord`].

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MapError, Result};

/// A dense `width` x `height` grid stored in row-major order.
///
/// Deserialization goes through [`Grid::from_cells`], so a decoded grid
/// always holds exactly `width * height` cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

/// Unchecked wire form of [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = String;

    fn try_from(raw: RawGrid<T>) -> std::result::Result<Self, Self::Error> {
        let (width, height, len) = (raw.width, raw.height, raw.cells.len());
        Self::from_cells(raw.width, raw.height, raw.cells)
            .ok_or_else(|| format!("{len} cells do not fill a {width}x{height} grid"))
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    #[must_use]
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");
        Self {
            width,
            height,
            cells: vec![value; (width as usize) * (height as usize)],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from cells already in row-major order.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    #[must_use]
    pub fn from_cells(width: i32, height: i32, cells: Vec<T>) -> Option<Self> {
        if width <= 0 || height <= 0 || cells.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `coord` lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.width, self.height)
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| (coord.y as usize) * (self.width as usize) + (coord.x as usize))
    }

    /// Cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Mutable cell at `coord`, or `None` when out of bounds.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.index(coord).map(|i| &mut self.cells[i])
    }

    /// Cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] outside the grid.
    pub fn try_get(&self, coord: Coord) -> Result<&T> {
        self.get(coord).ok_or(MapError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        })
    }

    /// Iterate `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as i32;
            (Coord::new(i % width, i / width), cell)
        })
    }
}

/// Boolean obstacle mask; `true` marks an obstructed tile.
pub type ObstacleMask = Grid<bool>;

impl Grid<bool> {
    /// All-open mask.
    #[must_use]
    pub fn open(width: i32, height: i32) -> Self {
        Self::filled(width, height, false)
    }

    /// Whether `coord` is obstructed. Out-of-bounds reads as obstructed.
    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.get(coord).copied().unwrap_or(true)
    }

    /// Mark or clear an obstacle. Returns `false` if out of bounds.
    pub fn set_blocked(&mut self, coord: Coord, blocked: bool) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                *cell = blocked;
                true
            }
            None => false,
        }
    }

    /// Number of obstructed tiles.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Obstructed coordinates in row-major order.
    #[must_use]
    pub fn blocked_coords(&self) -> Vec<Coord> {
        self.iter()
            .filter_map(|(coord, &blocked)| blocked.then_some(coord))
            .collect()
    }
}
