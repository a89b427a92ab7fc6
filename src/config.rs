use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::recommendation::{DEFAULT_GOAL, DEFAULT_RECOMMENDATION_URL};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_SOURCE: &str = "./LiveData";
const DEFAULT_WORKOUT_COUNT: usize = 351;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RECENT_LIMIT: usize = 5;
const DEFAULT_DISTANCE_DISPLAY_FACTOR: f64 = 2.0;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value}")]
  Invalid { name: String, value: String },
}

/// Where recommendations come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationMode {
  Remote,
  Offline,
}

impl FromStr for RecommendationMode {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "remote" => Ok(RecommendationMode::Remote),
      "offline" => Ok(RecommendationMode::Offline),
      _ => Err(()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// App Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  /// Directory path or http(s) base URL holding `WorkoutN.json` files
  pub source: String,
  pub workout_count: usize,
  pub recommendation_url: String,
  pub recommendation_mode: RecommendationMode,
  pub request_timeout: Duration,
  pub goal: String,
  pub recent_limit: usize,
  /// Display-only multiplier applied to raw distance
  pub distance_display_factor: f64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      source: DEFAULT_SOURCE.to_string(),
      workout_count: DEFAULT_WORKOUT_COUNT,
      recommendation_url: DEFAULT_RECOMMENDATION_URL.to_string(),
      recommendation_mode: RecommendationMode::Remote,
      request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      goal: DEFAULT_GOAL.to_string(),
      recent_limit: DEFAULT_RECENT_LIMIT,
      distance_display_factor: DEFAULT_DISTANCE_DISPLAY_FACTOR,
    }
  }
}

impl AppConfig {
  /// Read configuration from the process environment, falling back to defaults
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    Ok(Self {
      source: env::var("WORKOUT_SOURCE").unwrap_or(defaults.source),
      workout_count: parse_var("WORKOUT_COUNT", defaults.workout_count)?,
      recommendation_url: env::var("RECOMMENDATION_URL").unwrap_or(defaults.recommendation_url),
      recommendation_mode: parse_var("RECOMMENDATION_MODE", defaults.recommendation_mode)?,
      request_timeout: Duration::from_secs(parse_var(
        "RECOMMENDATION_TIMEOUT_SECS",
        DEFAULT_TIMEOUT_SECS,
      )?),
      goal: env::var("TRAINING_GOAL").unwrap_or(defaults.goal),
      recent_limit: parse_var("RECENT_SESSION_LIMIT", defaults.recent_limit)?,
      distance_display_factor: parse_var("DISTANCE_DISPLAY_FACTOR", defaults.distance_display_factor)?,
    })
  }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
  match env::var(name) {
    Ok(value) => match value.trim().parse() {
      Ok(parsed) => Ok(parsed),
      Err(_) => Err(ConfigError::Invalid {
        name: name.to_string(),
        value,
      }),
    },
    Err(_) => Ok(default),
  }
}
