use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// One sample on the time axis: ground truth (if known yet) plus both model predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Local 24-hour clock label, e.g. "14:03:27". Display only: never compared or sorted.
    pub time: String,
    /// `None` for forecast-only points (no ground truth yet).
    pub actual: Option<f64>,
    pub model1: f64,
    pub model2: f64,
}

impl DataPoint {
    pub fn new(time: impl Into<String>, actual: Option<f64>, model1: f64, model2: f64) -> Self {
        Self {
            time: time.into(),
            actual,
            model1,
            model2,
        }
    }

    pub fn forecast(time: impl Into<String>, model1: f64, model2: f64) -> Self {
        Self::new(time, None, model1, model2)
    }

    #[inline]
    pub fn is_forecast(&self) -> bool {
        self.actual.is_none()
    }

    pub fn prediction(&self, model: ModelKey) -> f64 {
        match model {
            ModelKey::Model1 => self.model1,
            ModelKey::Model2 => self.model2,
        }
    }

    pub fn value(&self, series: SeriesKey) -> Option<f64> {
        match series {
            SeriesKey::Actual => self.actual,
            SeriesKey::Model1 => Some(self.model1),
            SeriesKey::Model2 => Some(self.model2),
        }
    }
}

/// A point together with its position in the displayed sequence.
/// The x-axis and every range/zoom operation work on these indices, never on time labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint<'a> {
    pub index: usize,
    pub point: &'a DataPoint,
}

/// Pair each point with its zero-based index. Cheap: borrows the series.
pub fn indexed(series: &[DataPoint]) -> impl Iterator<Item = IndexedPoint<'_>> {
    series
        .iter()
        .enumerate()
        .map(|(index, point)| IndexedPoint { index, point })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum ModelKey {
    #[strum(to_string = "LightGBM + EMWA")]
    Model1,
    #[strum(to_string = "LightGBM")]
    Model2,
}

impl ModelKey {
    pub fn series(self) -> SeriesKey {
        match self {
            Self::Model1 => SeriesKey::Model1,
            Self::Model2 => SeriesKey::Model2,
        }
    }
}

/// Any line on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum SeriesKey {
    Actual,
    Model1,
    Model2,
}

impl SeriesKey {
    pub fn model(self) -> Option<ModelKey> {
        match self {
            Self::Actual => None,
            Self::Model1 => Some(ModelKey::Model1),
            Self::Model2 => Some(ModelKey::Model2),
        }
    }

    /// Short label used in tight spaces (tooltip rows).
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Actual => "Actual",
            Self::Model1 => "LGBM+",
            Self::Model2 => "LGBM",
        }
    }
}
