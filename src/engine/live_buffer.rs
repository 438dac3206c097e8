use crate::config::constants;
use crate::domain::DataPoint;

/// The most recent live points in arrival order, capped at `capacity`.
///
/// Evicted points are not removed one by one: the window start advances and the dead prefix
/// is compacted once it reaches `capacity`. Appends stay O(1) amortized, the window is always
/// a contiguous slice, and storage never exceeds `2 * capacity` points.
#[derive(Debug, Clone)]
pub struct LiveStreamBuffer {
    points: Vec<DataPoint>,
    start: usize,
    capacity: usize,
}

impl Default for LiveStreamBuffer {
    fn default() -> Self {
        Self::new(constants::LIVE_BUFFER_CAPACITY)
    }
}

impl LiveStreamBuffer {
    /// A zero capacity would make every append a no-op; it is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity * 2),
            start: 0,
            capacity,
        }
    }

    pub fn append(&mut self, point: DataPoint) {
        self.points.push(point);
        if self.points.len() - self.start > self.capacity {
            self.start = self.points.len() - self.capacity;
        }
        if self.start >= self.capacity {
            self.points.drain(..self.start);
            self.start = 0;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.start = 0;
    }

    /// Read-only view of the window, oldest first.
    pub fn snapshot(&self) -> &[DataPoint] {
        &self.points[self.start..]
    }

    pub fn len(&self) -> usize {
        self.points.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> DataPoint {
        DataPoint::new(format!("{}", i), Some(i as f64), 0.0, 0.0)
    }

    #[test]
    fn never_exceeds_capacity_and_keeps_suffix() {
        let mut buf = LiveStreamBuffer::default();
        for i in 0..137 {
            buf.append(point(i));
            assert!(buf.len() <= 50);

            let expected_start = (i + 1).saturating_sub(50);
            let times: Vec<String> = buf.snapshot().iter().map(|p| p.time.clone()).collect();
            let expected: Vec<String> = (expected_start..=i).map(|n| n.to_string()).collect();
            assert_eq!(times, expected);
        }
        assert_eq!(buf.len(), 50);
        assert_eq!(buf.snapshot().last().unwrap().time, "136");
    }

    #[test]
    fn storage_stays_bounded() {
        let mut buf = LiveStreamBuffer::new(4);
        for i in 0..1000 {
            buf.append(point(i));
            assert!(buf.points.len() <= 8);
        }
        assert_eq!(buf.snapshot().first().unwrap().time, "996");
    }

    #[test]
    fn clear_starts_a_fresh_window() {
        let mut buf = LiveStreamBuffer::new(3);
        for i in 0..5 {
            buf.append(point(i));
        }
        buf.clear();
        assert!(buf.is_empty());
        buf.append(point(99));
        assert_eq!(buf.snapshot().len(), 1);
        assert_eq!(buf.snapshot()[0].time, "99");
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buf = LiveStreamBuffer::new(0);
        buf.append(point(1));
        buf.append(point(2));
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.snapshot().iter().map(|p| p.time.as_str()).collect::<Vec<_>>(), vec!["2"]);
    }
}
