pub mod recommendation;
pub mod summary;
pub mod telemetry;

pub use recommendation::{RecommendationRequest, RecommendationResult, RecommendationState};
pub use summary::{SeriesPoint, SessionSummary, SummaryView, UNKNOWN_DATE_LABEL};
pub use telemetry::{Session, TelemetryEvent};
