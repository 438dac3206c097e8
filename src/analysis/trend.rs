use crate::config::constants::{self, sparkline};
use crate::domain::{DataPoint, SeriesKey};

/// Polyline in pixel space (origin top-left, y grows downwards), ready for a painter.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub points: Vec<[f64; 2]>,
}

impl Sparkline {
    /// Marker position for the most recent sample.
    pub fn last(&self) -> Option<[f64; 2]> {
        self.points.last().copied()
    }
}

/// Short look-back summary of one series around a point, for a miniature trend indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendWindow {
    pub lookback: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for TrendWindow {
    fn default() -> Self {
        Self {
            lookback: constants::TREND_LOOKBACK,
            width: sparkline::WIDTH,
            height: sparkline::HEIGHT,
        }
    }
}

impl TrendWindow {
    pub fn with_lookback(lookback: usize) -> Self {
        Self {
            lookback,
            ..Self::default()
        }
    }

    /// At most `lookback` points ending at `current_index` inclusive.
    /// Clamped at index 0 and at the end of the series, so a short prefix never panics.
    pub fn slice<'a>(&self, series: &'a [DataPoint], current_index: usize) -> &'a [DataPoint] {
        if series.is_empty() || self.lookback == 0 {
            return &[];
        }
        let end = current_index.min(series.len() - 1);
        let start = end.saturating_sub(self.lookback - 1);
        &series[start..=end]
    }

    /// Map values linearly into `[0, height]` using the slice's own min/max.
    /// Local shape only: two windows normalized this way are not comparable.
    /// Fewer than 2 values produce no line.
    pub fn normalize(&self, values: &[f64]) -> Option<Vec<[f64; 2]>> {
        if values.len() < 2 {
            return None;
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let last = (values.len() - 1) as f64;

        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = (i as f64 / last) * self.width;
                let y = self.height - ((v - min) / range) * self.height;
                [x, y]
            })
            .collect();
        Some(points)
    }

    /// Sparkline for one series ending at `current_index`. Samples with no value (forecast
    /// points on the actual series) are skipped.
    pub fn sparkline(
        &self,
        series: &[DataPoint],
        current_index: usize,
        key: SeriesKey,
    ) -> Option<Sparkline> {
        let values: Vec<f64> = self
            .slice(series, current_index)
            .iter()
            .filter_map(|p| p.value(key))
            .collect();
        self.normalize(&values).map(|points| Sparkline { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| DataPoint::new(format!("10:00:{:02}", i), Some(i as f64), 1.0, 2.0 * i as f64))
            .collect()
    }

    #[test]
    fn slice_returns_lookback_points_ending_at_current() {
        let s = series(20);
        let w = TrendWindow::default();
        let slice = w.slice(&s, 10);
        assert_eq!(slice.len(), 6);
        assert_eq!(slice.first().unwrap().time, "10:00:05");
        assert_eq!(slice.last().unwrap().time, "10:00:10");
    }

    #[test]
    fn slice_clamps_short_prefix() {
        let s = series(20);
        let w = TrendWindow::default();
        assert_eq!(w.slice(&s, 0).len(), 1);
        assert_eq!(w.slice(&s, 2).len(), 3);
        assert_eq!(w.slice(&[], 3).len(), 0);
        // Past the end clamps to the last point.
        assert_eq!(w.slice(&s, 100).last().unwrap().time, "10:00:19");
    }

    #[test]
    fn normalize_spans_full_height() {
        let w = TrendWindow::default();
        let pts = w.normalize(&[10.0, 20.0, 15.0]).unwrap();
        assert_eq!(pts[0], [0.0, 16.0]);
        assert_eq!(pts[1], [20.0, 0.0]);
        assert_eq!(pts[2], [40.0, 8.0]);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let w = TrendWindow::default();
        let pts = w.normalize(&[7.0, 7.0, 7.0]).unwrap();
        assert!(pts.iter().all(|p| p[1] == 16.0));
    }

    #[test]
    fn fewer_than_two_samples_produce_no_line() {
        let w = TrendWindow::default();
        assert_eq!(w.normalize(&[]), None);
        assert_eq!(w.normalize(&[3.0]), None);
        assert!(w.sparkline(&series(5), 0, SeriesKey::Model2).is_none());
    }

    #[test]
    fn sparkline_skips_missing_actuals() {
        let mut s = series(6);
        s[5].actual = None;
        s[4].actual = None;
        let w = TrendWindow::default();
        let line = w.sparkline(&s, 5, SeriesKey::Actual).unwrap();
        assert_eq!(line.points.len(), 4);
        assert_eq!(line.last(), Some([40.0, 0.0]));
    }
}
