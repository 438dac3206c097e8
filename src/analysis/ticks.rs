use crate::config::constants;
use crate::domain::ZoomRange;

/// Chooses evenly spaced x-axis label positions (start, ~25%, ~50%, ~75%, end) across the
/// visible index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlanner {
    tick_count: usize,
}

impl Default for TickPlanner {
    fn default() -> Self {
        Self::new(constants::AXIS_TICK_COUNT)
    }
}

impl TickPlanner {
    /// `tick_count` below 2 is raised to 2 (both ends are always labelled).
    pub fn new(tick_count: usize) -> Self {
        Self {
            tick_count: tick_count.max(2),
        }
    }

    /// Ticks for a resolved `(min_index, max_index)` over a series of `len` samples.
    /// Strictly increasing, every tick a valid index, non-empty whenever the range is valid.
    /// Ranges narrower than the tick count collapse duplicates.
    pub fn plan(&self, min_index: usize, max_index: usize, len: usize) -> Vec<usize> {
        if min_index >= max_index {
            return if min_index < len { vec![min_index] } else { Vec::new() };
        }

        let intervals = (self.tick_count - 1) as f64;
        let step = (max_index - min_index) as f64 / intervals;

        let mut ticks: Vec<usize> = (0..self.tick_count)
            .map(|i| (min_index as f64 + i as f64 * step).round() as usize)
            .filter(|&t| t < len)
            .collect();
        ticks.sort_unstable();
        ticks.dedup();
        ticks
    }

    /// Resolve the zoom sentinels first. Empty for an empty series or a stale range.
    pub fn plan_range(&self, range: &ZoomRange, len: usize) -> Vec<usize> {
        match range.resolve(len) {
            Some((min_index, max_index)) => self.plan(min_index, max_index, len),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strictly_increasing(v: &[usize]) -> bool {
        v.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn narrow_range_collapses_duplicates() {
        assert_eq!(TickPlanner::default().plan(0, 3, 4), vec![0, 1, 2, 3]);
        assert_eq!(TickPlanner::default().plan(7, 8, 10), vec![7, 8]);
    }

    #[test]
    fn single_point_range() {
        assert_eq!(TickPlanner::default().plan(0, 0, 1), vec![0]);
        assert_eq!(TickPlanner::default().plan(5, 2, 10), vec![5]);
    }

    #[test]
    fn wide_range_gives_five_quartile_ticks() {
        let ticks = TickPlanner::default().plan(0, 100, 101);
        assert_eq!(ticks, vec![0, 25, 50, 75, 100]);
        assert!(strictly_increasing(&ticks));
    }

    #[test]
    fn ticks_rounded_to_nearest_index() {
        // step = 49 / 4 = 12.25
        assert_eq!(TickPlanner::default().plan(0, 49, 50), vec![0, 12, 25, 37, 49]);
    }

    #[test]
    fn out_of_range_ticks_are_discarded() {
        let ticks = TickPlanner::default().plan(0, 8, 5);
        assert_eq!(ticks, vec![0, 2, 4]);
        assert!(TickPlanner::default().plan(9, 9, 5).is_empty());
    }

    #[test]
    fn plan_range_resolves_sentinels() {
        let planner = TickPlanner::default();
        assert_eq!(planner.plan_range(&ZoomRange::UNBOUNDED, 50), vec![0, 12, 25, 37, 49]);
        assert_eq!(planner.plan_range(&ZoomRange::between(10, 14), 50), vec![10, 11, 12, 13, 14]);
        assert!(planner.plan_range(&ZoomRange::UNBOUNDED, 0).is_empty());
        assert!(planner.plan_range(&ZoomRange::between(10, 60), 50).is_empty());
    }
}
