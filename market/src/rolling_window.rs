use std::collections::VecDeque;

/// Count-bounded window with a running sum for O(1) mean().
///
/// The running sum is re-derived from the stored values once every
/// `capacity` pushes so floating-point drift cannot accumulate over a
/// long-lived session.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    /// Values in insertion order (oldest at the front)
    values: VecDeque<f64>,

    sum: f64,

    capacity: usize,

    /// Pushes since `sum` was last recomputed from scratch
    since_resync: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            sum: 0.0,
            capacity,
            since_resync: 0,
        }
    }

    /// Appends `value`, evicting the oldest one once over capacity.
    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }

        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.capacity {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }

        self.since_resync += 1;
        if self.since_resync >= self.capacity {
            self.sum = self.values.iter().sum();
            self.since_resync = 0;
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Mean of the window, only once it holds `capacity` values.
    pub fn mean(&self) -> Option<f64> {
        self.is_full().then(|| self.sum / self.capacity as f64)
    }

    pub fn oldest(&self) -> Option<f64> {
        self.values.front().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
