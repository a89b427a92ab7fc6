use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;

use super::client::RecommendationService;
use crate::models::{RecommendationRequest, RecommendationResult, RecommendationState};
use crate::store::SessionStore;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrchestratorError {
  #[error("A recommendation request is already in flight")]
  AlreadyPending,
}

impl Serialize for OrchestratorError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Owns the recommendation slot and drives one request at a time through
/// `Idle -> Pending -> Settled`.
///
/// A submission while another is pending is rejected rather than racing the
/// slot. The state lock is never held across an await.
pub struct RecommendationOrchestrator<S> {
  service: S,
  state: Mutex<RecommendationState>,
}

impl<S: RecommendationService> RecommendationOrchestrator<S> {
  pub fn new(service: S) -> Self {
    Self {
      service,
      state: Mutex::new(RecommendationState::Idle),
    }
  }

  pub fn service(&self) -> &S {
    &self.service
  }

  /// Current slot contents
  pub fn state(&self) -> RecommendationState {
    self.lock_state().clone()
  }

  /// Flatten every stored session and ask for one recommendation
  pub async fn request_recommendation(
    &self,
    store: &SessionStore,
    goal: &str,
  ) -> Result<RecommendationResult, OrchestratorError> {
    let request = RecommendationRequest::from_sessions(store.all(), goal);
    self.submit(request).await
  }

  /// Issue a prepared payload. Any service failure settles as the generic failure message.
  ///
  /// Dropping the returned future before it completes puts the slot back to
  /// whatever it held before this submission.
  pub async fn submit(
    &self,
    request: RecommendationRequest,
  ) -> Result<RecommendationResult, OrchestratorError> {
    let pending = self.begin()?;

    let result = match self.service.recommend(&request).await {
      Ok(text) => {
        tracing::info!(events = request.session.len(), "Recommendation received");
        RecommendationResult::Succeeded(text)
      }
      Err(e) => {
        tracing::warn!(error = %e, "Recommendation request failed");
        RecommendationResult::failed()
      }
    };

    pending.settle(result.clone());
    Ok(result)
  }

  fn begin(&self) -> Result<PendingSlot<'_>, OrchestratorError> {
    let mut state = self.lock_state();
    if state.is_pending() {
      tracing::warn!("Rejecting recommendation request while another is pending");
      return Err(OrchestratorError::AlreadyPending);
    }
    let previous = std::mem::replace(&mut *state, RecommendationState::Pending);
    Ok(PendingSlot {
      state: &self.state,
      previous: Some(previous),
    })
  }

  fn lock_state(&self) -> MutexGuard<'_, RecommendationState> {
    lock(&self.state)
  }
}

fn lock(state: &Mutex<RecommendationState>) -> MutexGuard<'_, RecommendationState> {
  // State is a plain value; a poisoned lock still holds a usable one
  state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the slot in `Pending` for one submission
struct PendingSlot<'a> {
  state: &'a Mutex<RecommendationState>,
  /// What to restore if the submission is abandoned; `None` once settled
  previous: Option<RecommendationState>,
}

impl PendingSlot<'_> {
  fn settle(mut self, result: RecommendationResult) {
    self.previous = None;
    *lock(self.state) = RecommendationState::Settled(result);
  }
}

impl Drop for PendingSlot<'_> {
  fn drop(&mut self) {
    if let Some(previous) = self.previous.take() {
      tracing::warn!("Recommendation request abandoned before settling");
      *lock(self.state) = previous;
    }
  }
}
