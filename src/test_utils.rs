//! Test utilities and helpers
//!
//! This module provides common test infrastructure including:
//! - Telemetry and session factories
//! - Session directories on disk
//! - Ready-to-use application state

use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use crate::config::{AppConfig, RecommendationMode};
use crate::models::{RecommendationRequest, Session, TelemetryEvent};
use crate::recommendation::{Advisor, HttpRecommendationClient, OfflineAdvisor};
use crate::source::{AnySource, DirectorySource};
use crate::state::AppState;
use crate::store::SessionStore;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Event with a heart rate and timestamp
pub fn hr_event(heart_rate: f64, start_time: i64) -> TelemetryEvent {
  TelemetryEvent {
    heart_rate: Some(heart_rate),
    start_time: Some(start_time),
    ..Default::default()
  }
}

/// Event carrying only a timestamp
pub fn time_event(start_time: i64) -> TelemetryEvent {
  TelemetryEvent {
    start_time: Some(start_time),
    ..Default::default()
  }
}

/// Event carrying only a distance reading
pub fn distance_event(distance: f64) -> TelemetryEvent {
  TelemetryEvent {
    distance: Some(distance),
    ..Default::default()
  }
}

pub fn session_from(events: Vec<TelemetryEvent>) -> Session {
  Session::new(events)
}

/// Store holding `[[{hr 80, t 1}], [{hr 90, t 2}]]`
pub fn two_session_store() -> SessionStore {
  let mut store = SessionStore::new();
  store.append(session_from(vec![hr_event(80.0, 1)]));
  store.append(session_from(vec![hr_event(90.0, 2)]));
  store
}

/// The flattened payload for `two_session_store` with the default goal
pub fn mock_recommendation_request() -> RecommendationRequest {
  RecommendationRequest::from_sessions(two_session_store().all(), "endurance")
}

/// ---------------------------------------------------------------------------
/// Session Directories
/// ---------------------------------------------------------------------------

/// Write `WorkoutN.json` files into a temp dir. `None` leaves that file missing.
pub fn write_workout_dir(documents: &[Option<&str>]) -> TempDir {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");

  for (i, document) in documents.iter().enumerate() {
    if let Some(body) = document {
      std::fs::write(dir.path().join(format!("Workout{}.json", i + 1)), body)
        .expect("Failed to write workout file");
    }
  }

  dir
}

/// ---------------------------------------------------------------------------
/// App State
/// ---------------------------------------------------------------------------

fn test_config(dir: &Path, workout_count: usize, mode: RecommendationMode) -> AppConfig {
  AppConfig {
    source: dir.display().to_string(),
    workout_count,
    recommendation_mode: mode,
    ..AppConfig::default()
  }
}

/// State reading from `dir` with the offline advisor
pub fn offline_state(dir: &Path, workout_count: usize) -> AppState {
  AppState::new(
    test_config(dir, workout_count, RecommendationMode::Offline),
    AnySource::Directory(DirectorySource::new(dir)),
    Advisor::Offline(OfflineAdvisor),
  )
}

/// State reading from `dir` and posting to `endpoint`
pub fn remote_state(dir: &Path, workout_count: usize, endpoint: &str) -> AppState {
  let client = HttpRecommendationClient::new(endpoint, Duration::from_secs(5))
    .expect("Failed to build recommendation client");

  AppState::new(
    test_config(dir, workout_count, RecommendationMode::Remote),
    AnySource::Directory(DirectorySource::new(dir)),
    Advisor::Remote(client),
  )
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_workout_dir_skips_missing_entries() {
    let dir = write_workout_dir(&[Some("[]"), None, Some("[]")]);
    assert!(dir.path().join("Workout1.json").exists());
    assert!(!dir.path().join("Workout2.json").exists());
    assert!(dir.path().join("Workout3.json").exists());
  }

  #[test]
  fn test_mock_request_matches_store() {
    let request = mock_recommendation_request();
    assert_eq!(request.session.len(), 2);
    assert_eq!(request.goal, "endurance");
  }
}
