//! Recommendation service integration
//!
//! Sends the aggregate payload to the analysis backend and extracts the
//! `recommendation` text. An offline advisor answers locally when no backend
//! is configured.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::RecommendationRequest;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

pub const DEFAULT_RECOMMENDATION_URL: &str = "https://workout-ai-backend.onrender.com/analyze";
pub const DEFAULT_GOAL: &str = "endurance";
const FALLBACK_GOAL: &str = "general fitness";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

/// Failure classes are kept apart for logs; callers of the orchestrator only
/// ever see the generic failure message.
#[derive(Error, Debug)]
pub enum RecommendationError {
  #[error("Invalid endpoint: {0}")]
  Endpoint(String),

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: HTTP {status}: {body}")]
  Api { status: u16, body: String },

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("Response has no recommendation text")]
  MissingRecommendation,
}

/// ---------------------------------------------------------------------------
/// Service Abstraction
/// ---------------------------------------------------------------------------

pub trait RecommendationService {
  /// One round trip. No retries.
  fn recommend(
    &self,
    request: &RecommendationRequest,
  ) -> impl Future<Output = Result<String, RecommendationError>> + Send;
}

/// ---------------------------------------------------------------------------
/// HTTP Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpRecommendationClient {
  client: Client,
  endpoint: Url,
}

impl HttpRecommendationClient {
  pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RecommendationError> {
    let endpoint = Url::parse(endpoint).map_err(|e| RecommendationError::Endpoint(e.to_string()))?;
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| RecommendationError::Request(e.to_string()))?;

    Ok(Self { client, endpoint })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}

impl RecommendationService for HttpRecommendationClient {
  async fn recommend(&self, request: &RecommendationRequest) -> Result<String, RecommendationError> {
    tracing::debug!(
      endpoint = %self.endpoint,
      events = request.session.len(),
      goal = %request.goal,
      "Requesting recommendation"
    );

    let response = self
      .client
      .post(self.endpoint.clone())
      .json(request)
      .send()
      .await
      .map_err(|e| RecommendationError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| RecommendationError::Request(e.to_string()))?;

    if !status.is_success() {
      return Err(RecommendationError::Api {
        status: status.as_u16(),
        body,
      });
    }

    extract_recommendation(&body)
  }
}

/// Pull the `recommendation` string out of a response body
fn extract_recommendation(body: &str) -> Result<String, RecommendationError> {
  let value: Value = serde_json::from_str(body).map_err(|e| RecommendationError::Parse(e.to_string()))?;

  value
    .get("recommendation")
    .and_then(Value::as_str)
    .map(String::from)
    .ok_or(RecommendationError::MissingRecommendation)
}

/// ---------------------------------------------------------------------------
/// Offline Advisor
/// ---------------------------------------------------------------------------

/// Local stand-in for the backend's placeholder analysis
#[derive(Debug, Clone, Default)]
pub struct OfflineAdvisor;

impl OfflineAdvisor {
  pub fn advise(request: &RecommendationRequest) -> String {
    if request.session.is_empty() {
      return "Not enough data to analyze.".to_string();
    }

    let goal = if request.goal.trim().is_empty() {
      FALLBACK_GOAL
    } else {
      request.goal.as_str()
    };

    format!(
      "Based on {} data points, you should train with a focus on {}.",
      request.session.len(),
      goal
    )
  }
}

impl RecommendationService for OfflineAdvisor {
  async fn recommend(&self, request: &RecommendationRequest) -> Result<String, RecommendationError> {
    Ok(Self::advise(request))
  }
}

/// ---------------------------------------------------------------------------
/// Configured Service
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Advisor {
  Remote(HttpRecommendationClient),
  Offline(OfflineAdvisor),
}

impl RecommendationService for Advisor {
  async fn recommend(&self, request: &RecommendationRequest) -> Result<String, RecommendationError> {
    match self {
      Advisor::Remote(client) => client.recommend(request).await,
      Advisor::Offline(advisor) => advisor.recommend(request).await,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
