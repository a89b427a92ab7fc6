use crate::models::{RecommendationRequest, RecommendationResult, RecommendationState};
use crate::state::AppState;

/// Ask for one recommendation over every loaded session, using the configured goal.
/// A second call while one is in flight is rejected.
pub async fn request_overall_recommendation(state: &AppState) -> Result<RecommendationResult, String> {
  // Build the payload first so the store lock is released before the request goes out
  let request = {
    let store = state.store.read().await;
    RecommendationRequest::from_sessions(store.all(), &state.config.goal)
  };

  state
    .recommendations
    .submit(request)
    .await
    .map_err(|e| e.to_string())
}

pub async fn get_recommendation_state(state: &AppState) -> Result<RecommendationState, String> {
  Ok(state.recommendations.state())
}
