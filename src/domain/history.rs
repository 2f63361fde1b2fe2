//! Rolling buffer of recent AQI readings for the trend chart.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of readings kept.
pub const HISTORY_CAPACITY: usize = 7;

/// One logged reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Time label, e.g. `14:05`
    pub label: String,
    pub value: f64,
}

/// Fixed-capacity, oldest-first sequence of readings.
///
/// Appending past capacity evicts the oldest reading.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest if over capacity.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push_back(HistoryPoint {
            label: label.into(),
            value,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Copy of the current readings, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(position, value)` pairs for a line chart.
    #[must_use]
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect()
    }

    /// Largest logged value, if any.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_seven() {
        let mut buffer = HistoryBuffer::new();
        for i in 1..=9 {
            buffer.push(format!("t{i}"), f64::from(i));
        }

        assert_eq!(buffer.len(), 7);
        let values: Vec<f64> = buffer.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(buffer.snapshot()[0].label, "t3");
    }

    #[test]
    fn test_below_capacity_keeps_everything() {
        let mut buffer = HistoryBuffer::new();
        buffer.push("a", 10.0);
        buffer.push("b", 20.0);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.chart_points(), vec![(0.0, 10.0), (1.0, 20.0)]);
        assert_eq!(buffer.max_value(), Some(20.0));
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut buffer = HistoryBuffer::new();
        buffer.push("a", 1.0);
        let first = buffer.snapshot();
        let second = buffer.snapshot();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = HistoryBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), HISTORY_CAPACITY);
        assert_eq!(buffer.max_value(), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = HistoryBuffer::with_capacity(0);
        buffer.push("a", 1.0);
        buffer.push("b", 2.0);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.snapshot()[0].label, "b");
    }
}
