pub mod client;
pub mod orchestrator;

pub use client::{
  Advisor, HttpRecommendationClient, OfflineAdvisor, RecommendationError, RecommendationService,
  DEFAULT_GOAL, DEFAULT_RECOMMENDATION_URL,
};
pub use orchestrator::{OrchestratorError, RecommendationOrchestrator};
