use std::sync::atomic::AtomicBool;

use tokio::sync::RwLock;

use crate::config::{AppConfig, RecommendationMode};
use crate::error::AppError;
use crate::recommendation::{Advisor, HttpRecommendationClient, OfflineAdvisor, RecommendationOrchestrator};
use crate::source::AnySource;
use crate::store::SessionStore;

/// Application state shared by every command.
///
/// The store is only written by the load commands; the orchestrator owns the
/// recommendation slot.
pub struct AppState {
  pub config: AppConfig,
  pub source: AnySource,
  pub store: RwLock<SessionStore>,
  pub loaded: AtomicBool,
  pub recommendations: RecommendationOrchestrator<Advisor>,
}

impl AppState {
  pub fn new(config: AppConfig, source: AnySource, advisor: Advisor) -> Self {
    Self {
      config,
      source,
      store: RwLock::new(SessionStore::new()),
      loaded: AtomicBool::new(false),
      recommendations: RecommendationOrchestrator::new(advisor),
    }
  }

  /// Build the source and recommendation service described by `config`
  pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
    let source = AnySource::from_location(&config.source)?;

    let advisor = match config.recommendation_mode {
      RecommendationMode::Remote => Advisor::Remote(HttpRecommendationClient::new(
        &config.recommendation_url,
        config.request_timeout,
      )?),
      RecommendationMode::Offline => Advisor::Offline(OfflineAdvisor),
    };

    Ok(Self::new(config, source, advisor))
  }
}
