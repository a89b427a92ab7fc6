use crate::config::ConfigError;
use crate::recommendation::RecommendationError;
use crate::source::SourceError;

/// Failures that stop the application from starting
#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Session source error: {0}")]
  Source(#[from] SourceError),

  #[error("Recommendation service error: {0}")]
  Recommendation(#[from] RecommendationError),

  #[error("Runtime error: {0}")]
  Runtime(#[from] std::io::Error),
}
