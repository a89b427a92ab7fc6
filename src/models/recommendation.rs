use serde::{Deserialize, Serialize};

use super::telemetry::{Session, TelemetryEvent};

/// Message surfaced for every failed recommendation round trip
pub const RECOMMENDATION_FAILED_MESSAGE: &str = "Error getting recommendation.";

/// Aggregate payload sent to the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
  /// Every stored session's events, concatenated in store order
  pub session: Vec<TelemetryEvent>,
  pub goal: String,
}

impl RecommendationRequest {
  /// Flatten sessions in order. No deduplication, no re-sorting.
  pub fn from_sessions(sessions: &[Session], goal: &str) -> Self {
    let session = sessions
      .iter()
      .flat_map(|s| s.events.iter().cloned())
      .collect();

    Self {
      session,
      goal: goal.to_string(),
    }
  }
}

/// Settled outcome of one recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum RecommendationResult {
  Succeeded(String),
  Failed(String),
}

impl RecommendationResult {
  pub fn failed() -> Self {
    RecommendationResult::Failed(RECOMMENDATION_FAILED_MESSAGE.to_string())
  }
}

/// Lifecycle of the recommendation slot: Idle -> Pending -> Settled, re-enterable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "result", rename_all = "snake_case")]
pub enum RecommendationState {
  #[default]
  Idle,
  Pending,
  Settled(RecommendationResult),
}

impl RecommendationState {
  pub fn is_pending(&self) -> bool {
    matches!(self, RecommendationState::Pending)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(hr: f64, t: i64) -> TelemetryEvent {
    TelemetryEvent {
      heart_rate: Some(hr),
      start_time: Some(t),
      ..Default::default()
    }
  }

  #[test]
  fn test_flatten_concatenates_in_store_order() {
    let sessions = vec![
      Session::new(vec![event(80.0, 1)]),
      Session::new(vec![event(90.0, 2), event(95.0, 0)]),
    ];

    let request = RecommendationRequest::from_sessions(&sessions, "endurance");
    assert_eq!(request.goal, "endurance");
    assert_eq!(request.session.len(), 3);
    assert_eq!(request.session[0].heart_rate, Some(80.0));
    assert_eq!(request.session[1].heart_rate, Some(90.0));
    assert_eq!(request.session[2].start_time, Some(0));
  }

  #[test]
  fn test_flatten_keeps_duplicates() {
    let session = Session::new(vec![event(80.0, 1)]);
    let request = RecommendationRequest::from_sessions(&[session.clone(), session], "x");
    assert_eq!(request.session.len(), 2);
  }

  #[test]
  fn test_payload_shape() {
    let request = RecommendationRequest::from_sessions(&[Session::new(vec![event(80.0, 1)])], "endurance");
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "session": [{ "heart_rate": 80.0, "start_time": 1 }],
        "goal": "endurance"
      })
    );
  }

  #[test]
  fn test_state_serializes_for_presentation() {
    let state = RecommendationState::Settled(RecommendationResult::Succeeded("Add intervals".into()));
    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "state": "settled",
        "result": { "status": "succeeded", "message": "Add intervals" }
      })
    );
    assert_eq!(
      serde_json::to_value(RecommendationState::Idle).unwrap(),
      serde_json::json!({ "state": "idle" })
    );
  }
}
