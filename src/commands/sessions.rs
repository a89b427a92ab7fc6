use std::sync::atomic::Ordering;

use serde::Serialize;

use crate::source::{load_sessions as load_from_source, workout_file_names, LoadReport, SessionSource};
use crate::state::AppState;
use crate::store::SessionStore;

/// ---------------------------------------------------------------------------
/// Load Sessions
/// ---------------------------------------------------------------------------

/// Load every session once. Later calls return `None` without touching the store.
pub async fn load_sessions(state: &AppState) -> Result<Option<LoadReport>, String> {
  load_from(state, &state.source).await
}

/// The store only changes once the whole load has finished, so an abandoned
/// load leaves it as it was and the next call starts over.
async fn load_from<S: SessionSource>(state: &AppState, source: &S) -> Result<Option<LoadReport>, String> {
  // The write lock serializes concurrent load triggers
  let mut store = state.store.write().await;

  if state.loaded.load(Ordering::SeqCst) {
    tracing::debug!("Sessions already loaded, skipping");
    return Ok(None);
  }

  let ids = workout_file_names(state.config.workout_count);
  tracing::info!(source = %state.config.source, count = ids.len(), "Loading sessions");

  let mut fresh = SessionStore::new();
  let report = load_from_source(source, &ids, &mut fresh).await;
  *store = fresh;
  state.loaded.store(true, Ordering::SeqCst);

  Ok(Some(report))
}

/// Discard the store and load everything again
pub async fn reload_sessions(state: &AppState) -> Result<LoadReport, String> {
  {
    let mut store = state.store.write().await;
    store.reset();
    state.loaded.store(false, Ordering::SeqCst);
  }

  load_sessions(state)
    .await?
    .ok_or_else(|| "Sessions were loaded concurrently".to_string())
}

/// ---------------------------------------------------------------------------
/// Load Status
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq)]
pub struct LoadStatus {
  pub loaded: bool,
  pub session_count: usize,
}

pub async fn get_load_status(state: &AppState) -> Result<LoadStatus, String> {
  let store = state.store.read().await;
  Ok(LoadStatus {
    loaded: state.loaded.load(Ordering::SeqCst),
    session_count: store.len(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::SourceError;
  use crate::test_utils::*;
  use serde_json::{json, Value};
  use std::sync::atomic::AtomicBool;
  use std::time::Duration;

  /// Serves one event per workout, but hangs on `Workout2.json` the first time
  struct StallOnceSource {
    stalled: AtomicBool,
  }

  impl SessionSource for StallOnceSource {
    async fn fetch(&self, id: &str) -> Result<Value, SourceError> {
      if id == "Workout2.json" && !self.stalled.swap(true, Ordering::SeqCst) {
        std::future::pending::<()>().await;
      }
      Ok(json!([{ "heart_rate": 100, "start_time": 0, "id": id }]))
    }
  }

  #[tokio::test]
  async fn test_load_sessions_once() {
    let dir = write_workout_dir(&[
      Some(r#"[{"heart_rate": 100, "start_time": 0}]"#),
      Some(r#"{"oops": true}"#),
      Some(r#"[{"heart_rate": 110, "start_time": 0}]"#),
    ]);
    let state = offline_state(dir.path(), 3);

    let report = load_sessions(&state).await.unwrap().unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, vec!["Workout2.json".to_string()]);

    assert!(load_sessions(&state).await.unwrap().is_none());
    let status = get_load_status(&state).await.unwrap();
    assert_eq!(status, LoadStatus { loaded: true, session_count: 2 });
  }

  #[tokio::test]
  async fn test_status_before_load() {
    let dir = write_workout_dir(&[]);
    let state = offline_state(dir.path(), 0);
    let status = get_load_status(&state).await.unwrap();
    assert_eq!(status, LoadStatus { loaded: false, session_count: 0 });
  }

  #[tokio::test]
  async fn test_reload_replaces_store() {
    let dir = write_workout_dir(&[Some(r#"[{"heart_rate": 100}]"#)]);
    let state = offline_state(dir.path(), 1);

    load_sessions(&state).await.unwrap();
    std::fs::write(dir.path().join("Workout1.json"), r#"[{"heart_rate": 140}]"#).unwrap();

    let report = reload_sessions(&state).await.unwrap();
    assert_eq!(report.loaded, 1);

    let store = state.store.read().await;
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].events[0].heart_rate, Some(140.0));
  }

  #[tokio::test]
  async fn test_abandoned_load_leaves_store_untouched() {
    let dir = write_workout_dir(&[]);
    let state = offline_state(dir.path(), 2);
    let source = StallOnceSource {
      stalled: AtomicBool::new(false),
    };

    let abandoned = tokio::time::timeout(Duration::from_millis(20), load_from(&state, &source)).await;
    assert!(abandoned.is_err());
    let status = get_load_status(&state).await.unwrap();
    assert_eq!(status, LoadStatus { loaded: false, session_count: 0 });

    let report = load_from(&state, &source).await.unwrap().unwrap();
    assert_eq!(report.loaded, 2);

    let store = state.store.read().await;
    assert_eq!(store.len(), 2);
    let ids: Vec<&Value> = store.all().iter().map(|s| &s.events[0].raw.as_ref().unwrap()["id"]).collect();
    assert_eq!(ids, vec![&json!("Workout1.json"), &json!("Workout2.json")]);
  }
}
