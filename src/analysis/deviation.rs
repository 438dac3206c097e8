use crate::config::{MonitorSettings, Ratio, constants};
use crate::domain::{DataPoint, ModelKey};

/// How far one model's prediction missed the ground truth at one point.
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationRecord {
    pub model: ModelKey,
    pub actual: f64,
    pub predicted: f64,
    pub deviation: Ratio,
    pub is_error: bool,
}

impl DeviationRecord {
    /// Signed miss: positive means the model over-estimated.
    pub fn signed_error(&self) -> f64 {
        self.predicted - self.actual
    }

    pub fn is_overestimate(&self) -> bool {
        self.signed_error() > 0.0
    }
}

/// Fixed explanatory payload shown when a user asks why a point was flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct RootCauseNarrative {
    pub model: ModelKey,
    pub deviation: Ratio,
    pub threshold: Ratio,
    pub causes: &'static [&'static str],
    pub recommended_action: &'static str,
}

impl RootCauseNarrative {
    pub fn headline(&self) -> String {
        format!("{} • {} Error", self.model, self.deviation)
    }

    pub fn summary(&self) -> String {
        format!(
            "The model's prediction significantly diverged from the actual request per second (RPS) count. \
             This anomaly exceeds the configured threshold of {:.0}%.",
            self.threshold.as_percent()
        )
    }
}

pub const ROOT_CAUSES: &[&str] = &[
    "Sudden unscheduled traffic spike (DDoS or Flash Crowd)",
    "Feature drift: Input data distribution has changed significantly",
    "Model is over-smoothing recent volatile data points",
    "Infrastructure latency affecting metric collection",
];

pub const RECOMMENDED_ACTION: &str = "Check system logs for traffic anomalies. If traffic is legitimate, \
     consider retraining the model with the latest dataset to capture this new trend.";

/// Compares actual vs. predicted values. Pure: holds only the anomaly threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationAnalyzer {
    threshold: Ratio,
}

impl Default for DeviationAnalyzer {
    fn default() -> Self {
        Self::new(constants::ERROR_THRESHOLD)
    }
}

impl DeviationAnalyzer {
    pub const fn new(threshold: Ratio) -> Self {
        Self { threshold }
    }

    pub fn from_settings(settings: &MonitorSettings) -> Self {
        Self::new(settings.error_threshold)
    }

    pub fn threshold(&self) -> Ratio {
        self.threshold
    }

    /// `|actual - predicted| / actual`. Not evaluable (`None`) unless `actual > 0`.
    pub fn relative_deviation(actual: f64, predicted: f64) -> Option<Ratio> {
        if !actual.is_finite() || actual <= 0.0 || !predicted.is_finite() {
            return None;
        }
        Some(Ratio::new((actual - predicted).abs() / actual))
    }

    /// Strictly greater than the threshold. The boundary itself is not an error.
    pub fn is_error(&self, deviation: Ratio) -> bool {
        deviation > self.threshold
    }

    /// Smaller absolute error wins. On an exact tie model1 wins.
    pub fn best_model(actual: f64, v1: f64, v2: f64) -> ModelKey {
        let dev1 = (actual - v1).abs();
        let dev2 = (actual - v2).abs();
        if dev1 <= dev2 {
            ModelKey::Model1
        } else {
            ModelKey::Model2
        }
    }

    /// Best model at a point, or `None` for a forecast point (no ground truth to compare).
    pub fn best_model_at(point: &DataPoint) -> Option<ModelKey> {
        point
            .actual
            .map(|actual| Self::best_model(actual, point.model1, point.model2))
    }

    /// Deviation record for one model at one point. `None` when the point is a forecast or the
    /// actual value is zero: such points are never anomaly candidates.
    pub fn evaluate(&self, point: &DataPoint, model: ModelKey) -> Option<DeviationRecord> {
        let actual = point.actual?;
        let predicted = point.prediction(model);
        let deviation = Self::relative_deviation(actual, predicted)?;
        Some(DeviationRecord {
            model,
            actual,
            predicted,
            deviation,
            is_error: self.is_error(deviation),
        })
    }

    pub fn is_error_at(&self, point: &DataPoint, model: ModelKey) -> bool {
        self.evaluate(point, model).is_some_and(|r| r.is_error)
    }

    pub fn root_cause_narrative(&self, model: ModelKey, deviation: Ratio) -> RootCauseNarrative {
        RootCauseNarrative {
            model,
            deviation,
            threshold: self.threshold,
            causes: ROOT_CAUSES,
            recommended_action: RECOMMENDED_ACTION,
        }
    }
}
