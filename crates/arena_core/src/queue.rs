//! Cyclic coordinate queues.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// A FIFO of coordinates that is drawn from cyclically.
///
/// Each draw pops the front and pushes it back to the end, so the queue
/// never runs dry and replays its order indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoordQueue {
    items: VecDeque<Coord>,
}

impl CoordQueue {
    /// Create a queue that yields `items` in order.
    #[must_use]
    pub fn new(items: Vec<Coord>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Pop the front coordinate and requeue it at the back.
    ///
    /// Returns `None` only when the queue is empty.
    pub fn next_cyclic(&mut self) -> Option<Coord> {
        let coord = self.items.pop_front()?;
        self.items.push_back(coord);
        Some(coord)
    }

    /// Number of coordinates in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current order, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.items.iter()
    }

    /// Whether `coord` is part of the cycle.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.items.contains(&coord)
    }
}
