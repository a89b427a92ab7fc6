use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label shown when a session has no timestamped events
pub const UNKNOWN_DATE_LABEL: &str = "Unknown date";

/// Per-session metrics. Only built when every required metric is available,
/// so holding one means the session is displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
  pub max_heart_rate: f64,
  pub avg_heart_rate: i64,
  pub duration_minutes: i64,
  /// First strictly positive distance in arrival order, in the device's unit
  pub distance_raw: f64,
  /// Calendar date (UTC) of the earliest timestamped event
  pub session_date: Option<NaiveDate>,
}

impl SessionSummary {
  pub fn date_label(&self) -> String {
    self
      .session_date
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| UNKNOWN_DATE_LABEL.to_string())
  }

  /// Shape handed to the presentation layer
  pub fn to_view(&self, distance_display_factor: f64) -> SummaryView {
    SummaryView {
      date: self.date_label(),
      duration_minutes: self.duration_minutes,
      max_heart_rate: self.max_heart_rate,
      avg_heart_rate: self.avg_heart_rate,
      distance: self.distance_raw * distance_display_factor,
    }
  }
}

/// Display-ready summary row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
  pub date: String,
  pub duration_minutes: i64,
  pub max_heart_rate: f64,
  pub avg_heart_rate: i64,
  pub distance: f64,
}

/// One chart point: heart rate at a wall-clock label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
  pub time_label: String,
  pub heart_rate: f64,
}
