pub mod recommendation;
pub mod sessions;

use serde::Serialize;

use crate::analysis::{project, summarize};
use crate::models::{SeriesPoint, SummaryView};
use crate::state::AppState;

/// One displayable session: its summary and heart-rate chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionCard {
  /// Position in the store, usable with `get_session_series`
  pub index: usize,
  pub summary: SummaryView,
  pub series: Vec<SeriesPoint>,
}

/// Cards for the most recent sessions, in store order. Incomplete sessions are left out.
pub async fn get_recent_sessions(state: &AppState) -> Result<Vec<SessionCard>, String> {
  let store = state.store.read().await;
  let recent = store.recent(state.config.recent_limit);
  let offset = store.len() - recent.len();

  let cards = recent
    .iter()
    .enumerate()
    .filter_map(|(i, session)| {
      let summary = summarize(session)?;
      Some(SessionCard {
        index: offset + i,
        summary: summary.to_view(state.config.distance_display_factor),
        series: project(session).collect(),
      })
    })
    .collect();

  Ok(cards)
}

/// Chart series for any stored session, including suppressed ones
pub async fn get_session_series(state: &AppState, index: usize) -> Result<Vec<SeriesPoint>, String> {
  let store = state.store.read().await;
  let session = store
    .get(index)
    .ok_or_else(|| format!("No session at index {}", index))?;
  Ok(project(session).collect())
}
