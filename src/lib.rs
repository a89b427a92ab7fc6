pub mod analysis;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod source;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_utils;

use commands::SessionCard;
use config::AppConfig;
use error::AppError;
use models::{RecommendationResult, UNKNOWN_DATE_LABEL};
use state::AppState;

/// Load every session, print the recent summaries and optionally fetch the
/// aggregate recommendation.
pub fn run(recommend: bool) -> Result<(), AppError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init_logging();

  let config = AppConfig::from_env()?;
  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?;

  runtime.block_on(async move {
    let state = AppState::from_config(config)?;

    match commands::sessions::load_sessions(&state).await {
      Ok(Some(report)) if !report.skipped.is_empty() => {
        tracing::info!(skipped = report.skipped.len(), "Some sessions could not be read");
      }
      Ok(_) => {}
      Err(e) => tracing::error!(error = %e, "Failed to load sessions"),
    }

    match commands::get_recent_sessions(&state).await {
      Ok(cards) if cards.is_empty() => println!("No complete workouts to show."),
      Ok(cards) => cards.iter().for_each(|card| println!("{}", render_card(card))),
      Err(e) => tracing::error!(error = %e, "Failed to summarize sessions"),
    }

    if recommend {
      match commands::recommendation::request_overall_recommendation(&state).await {
        Ok(RecommendationResult::Succeeded(text)) => println!("Suggestion: {}", text),
        Ok(RecommendationResult::Failed(message)) => println!("{}", message),
        Err(e) => tracing::warn!(error = %e, "Recommendation not requested"),
      }
    }

    Ok::<(), AppError>(())
  })
}

fn render_card(card: &SessionCard) -> String {
  let summary = &card.summary;
  let title = if summary.date == UNKNOWN_DATE_LABEL {
    format!("Swim ({})", UNKNOWN_DATE_LABEL)
  } else {
    format!("Swim on {}", summary.date)
  };

  format!(
    "{}\n  Duration: {} minutes\n  Max Heart Rate: {}\n  Avg Heart Rate: {}\n  Distance: {} meters\n  Samples: {}",
    title,
    summary.duration_minutes,
    summary.max_heart_rate,
    summary.avg_heart_rate,
    summary.distance,
    card.series.len()
  )
}
