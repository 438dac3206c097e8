//! Display summaries derived from the active series: headline RPS, legend winner,
//! drag-selection badge and the per-point tooltip report.

use chrono::NaiveTime;
use strum::IntoEnumIterator;

use crate::analysis::{DeviationAnalyzer, DeviationRecord, Sparkline, TrendWindow};
use crate::domain::{DataPoint, ModelKey, SeriesKey, ViewMode};
use crate::utils::{CLOCK_FORMAT, format_span_secs};

pub fn view_title(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Live => "Real-time RPS",
        ViewMode::OneHour => "Historical RPS (Last Hour)",
        ViewMode::SixHours => "Historical RPS (Last 6 Hours)",
        ViewMode::TwentyFourHours => "Historical RPS (Last 24 Hours)",
    }
}

/// Headline RPS: the newest actual, falling back to the one before it when the newest point
/// has no (or a zero) reading yet.
pub fn current_rps(series: &[DataPoint]) -> Option<f64> {
    let last = series.last()?;
    match last.actual {
        Some(v) if v != 0.0 => Some(v),
        _ if series.len() > 1 => series[series.len() - 2].actual,
        _ => None,
    }
}

/// Winner at the most recent point that has ground truth.
pub fn legend_best_model(series: &[DataPoint]) -> Option<ModelKey> {
    series
        .iter()
        .rev()
        .find(|p| p.actual.is_some())
        .and_then(DeviationAnalyzer::best_model_at)
}

/// Badge shown over an in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub point_count: usize,
    pub duration_label: String,
}

/// `None` when the drag covers fewer than two points, an end is outside the series, or a time
/// label does not parse as `HH:MM:SS`.
pub fn selection_summary(series: &[DataPoint], left: usize, right: usize) -> Option<SelectionSummary> {
    let start = left.min(right);
    let end = left.max(right);
    let point_count = end - start + 1;
    if point_count <= 1 {
        return None;
    }

    let t1 = parse_clock(&series.get(start)?.time)?;
    let t2 = parse_clock(&series.get(end)?.time)?;
    let diff_seconds = (t2 - t1).num_seconds().abs();

    Some(SelectionSummary {
        point_count,
        duration_label: format_span_secs(diff_seconds),
    })
}

fn parse_clock(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label, CLOCK_FORMAT).ok()
}

/// One tooltip row.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub key: SeriesKey,
    pub value: f64,
    /// Models only, and only when the point is evaluable.
    pub deviation: Option<DeviationRecord>,
    pub is_best: bool,
    pub sparkline: Option<Sparkline>,
}

impl SeriesRow {
    pub fn is_error(&self) -> bool {
        self.deviation.is_some_and(|d| d.is_error)
    }
}

/// Everything the tooltip needs for one hovered point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointReport {
    pub index: usize,
    pub time: String,
    pub is_forecast: bool,
    pub best_model: Option<ModelKey>,
    pub rows: Vec<SeriesRow>,
}

impl PointReport {
    pub fn row(&self, key: SeriesKey) -> Option<&SeriesRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

pub fn point_report(
    series: &[DataPoint],
    index: usize,
    analyzer: &DeviationAnalyzer,
    trend: &TrendWindow,
) -> Option<PointReport> {
    let point = series.get(index)?;
    let best_model = DeviationAnalyzer::best_model_at(point);

    let rows = SeriesKey::iter()
        .filter_map(|key| {
            let value = point.value(key)?;
            let model = key.model();
            Some(SeriesRow {
                key,
                value,
                deviation: model.and_then(|m| analyzer.evaluate(point, m)),
                is_best: model.is_some() && model == best_model,
                sparkline: trend.sparkline(series, index, key),
            })
        })
        .collect();

    Some(PointReport {
        index,
        time: point.time.clone(),
        is_forecast: point.is_forecast(),
        best_model,
        rows,
    })
}
