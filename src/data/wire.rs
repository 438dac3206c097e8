//! JSON record shape shared by the live feed and the history endpoint.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::DataPoint;
use crate::utils::format_local_clock;

/// Raw record as it arrives on the wire. Older backends send `timestamp` / `actual_rps`.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePoint {
    #[serde(alias = "timestamp")]
    pub time: String,
    #[serde(default, alias = "actual_rps")]
    pub actual: Option<f64>,
    pub model1: f64,
    pub model2: f64,
}

impl TryFrom<WirePoint> for DataPoint {
    type Error = anyhow::Error;

    fn try_from(wire: WirePoint) -> Result<Self> {
        if !wire.model1.is_finite() || !wire.model2.is_finite() {
            bail!(
                "non-finite prediction (model1={}, model2={})",
                wire.model1,
                wire.model2
            );
        }
        let actual = match wire.actual {
            Some(v) if !v.is_finite() => bail!("non-finite actual {}", v),
            other => other,
        };
        let time = clock_label(&wire.time)?;
        Ok(DataPoint::new(time, actual, wire.model1, wire.model2))
    }
}

/// Render a wire timestamp as a local 24-hour `HH:MM:SS` label.
/// Accepts RFC 3339 with offset, or a naive ISO timestamp which is taken to be UTC.
pub fn clock_label(raw: &str) -> Result<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format_local_clock(dt.with_timezone(&Utc)));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .with_context(|| format!("unparseable timestamp '{}'", raw))?;
    Ok(format_local_clock(naive.and_utc()))
}

/// Decode one live-feed message.
pub fn decode_point(text: &str) -> Result<DataPoint> {
    let wire: WirePoint = serde_json::from_str(text).context("malformed point payload")?;
    wire.try_into()
}

/// Decode a history body (a JSON array of points). One bad record fails the whole window
/// so a partial series is never displayed as if complete.
pub fn decode_series(text: &str) -> Result<Vec<DataPoint>> {
    let wire: Vec<WirePoint> = serde_json::from_str(text).context("malformed history payload")?;
    wire.into_iter()
        .enumerate()
        .map(|(i, w)| DataPoint::try_from(w).with_context(|| format!("history record {}", i)))
        .collect()
}
