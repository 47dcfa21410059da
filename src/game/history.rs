use std::collections::VecDeque;

/// Fixed-capacity window of recent player x-positions, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct PositionHistory {
    positions: VecDeque<f32>,
    capacity: usize,
}

impl PositionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append the newest position, evicting the oldest once over capacity
    pub fn push(&mut self, x: f32) {
        self.positions.push_back(x);
        if self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f32> {
        self.positions.back().copied()
    }

    /// Positions in chronological order
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.positions.iter().copied()
    }
}
