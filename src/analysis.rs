//! Deterministic analysis layer for session telemetry
//!
//! Reduces a raw event array to summary metrics and a chart-ready heart-rate
//! series. Nothing here fails: missing data is represented, never an error.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{SeriesPoint, Session, SessionSummary, TelemetryEvent};

const MS_PER_MINUTE: f64 = 60_000.0;

/// ---------------------------------------------------------------------------
/// Session Metrics (may be incomplete)
/// ---------------------------------------------------------------------------

/// Every metric the summarizer derives, each one possibly unavailable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetrics {
  pub max_heart_rate: Option<f64>,
  pub avg_heart_rate: Option<i64>,
  pub duration_minutes: Option<i64>,
  pub distance_raw: Option<f64>,
  pub session_date: Option<NaiveDate>,
}

impl SessionMetrics {
  pub fn compute(session: &Session) -> Self {
    let events = &session.events;

    let heart_rates: Vec<f64> = events.iter().filter_map(|e| e.heart_rate).collect();
    let max_heart_rate = heart_rates.iter().copied().reduce(f64::max);
    let avg_heart_rate = if heart_rates.is_empty() {
      None
    } else {
      let mean = heart_rates.iter().sum::<f64>() / heart_rates.len() as f64;
      Some(round_half_up(mean))
    };

    // Timestamps outside chrono's range count as absent
    let mut times: Vec<DateTime<Utc>> = events.iter().filter_map(event_time).collect();
    times.sort();

    let duration_minutes = match (times.first(), times.last()) {
      (Some(first), Some(last)) if times.len() >= 2 => {
        let span_ms = last.timestamp_millis() as f64 - first.timestamp_millis() as f64;
        Some(round_half_up(span_ms / MS_PER_MINUTE))
      }
      _ => None,
    };

    let session_date = times.first().map(|dt| dt.date_naive());

    // Arrival order, not time order
    let distance_raw = events.iter().find_map(TelemetryEvent::positive_distance);

    Self {
      max_heart_rate,
      avg_heart_rate,
      duration_minutes,
      distance_raw,
      session_date,
    }
  }

  /// Names of the required metrics that could not be derived
  pub fn missing(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if self.max_heart_rate.is_none() {
      missing.push("max_heart_rate");
    }
    if self.avg_heart_rate.is_none() {
      missing.push("avg_heart_rate");
    }
    if self.duration_minutes.is_none() {
      missing.push("duration_minutes");
    }
    if self.distance_raw.is_none() {
      missing.push("distance_raw");
    }
    missing
  }

  /// A summary only when every required metric is present. The date does not gate display.
  pub fn into_summary(self) -> Option<SessionSummary> {
    match (
      self.max_heart_rate,
      self.avg_heart_rate,
      self.duration_minutes,
      self.distance_raw,
    ) {
      (Some(max_heart_rate), Some(avg_heart_rate), Some(duration_minutes), Some(distance_raw)) => {
        Some(SessionSummary {
          max_heart_rate,
          avg_heart_rate,
          duration_minutes,
          distance_raw,
          session_date: self.session_date,
        })
      }
      _ => None,
    }
  }
}

/// Summarize a session. `None` means the session is suppressed from summary listings.
pub fn summarize(session: &Session) -> Option<SessionSummary> {
  let metrics = SessionMetrics::compute(session);
  let missing = metrics.missing();
  if !missing.is_empty() {
    tracing::debug!(events = session.len(), ?missing, "Suppressing incomplete session");
  }
  metrics.into_summary()
}

fn round_half_up(value: f64) -> i64 {
  (value + 0.5).floor() as i64
}

fn event_time(event: &TelemetryEvent) -> Option<DateTime<Utc>> {
  event.start_time.and_then(DateTime::from_timestamp_millis)
}

/// ---------------------------------------------------------------------------
/// Series Projection
/// ---------------------------------------------------------------------------

/// Heart-rate series for charting, in arrival order (deliberately not time-sorted).
///
/// Only events carrying both a heart rate and a representable timestamp are kept. The returned
/// iterator is lazy and cloneable, so it can be replayed.
pub fn project(session: &Session) -> impl Iterator<Item = SeriesPoint> + Clone + '_ {
  session.events.iter().filter_map(|event| {
    let heart_rate = event.heart_rate?;
    let time = event_time(event)?;
    Some(SeriesPoint {
      time_label: time.format("%H:%M:%S").to_string(),
      heart_rate,
    })
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
