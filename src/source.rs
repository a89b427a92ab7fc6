//! Session source boundary
//!
//! Sessions arrive as JSON arrays of telemetry events, one document per
//! identifier. Anything unreadable is skipped: ingestion is best effort and
//! failures never propagate past the load loop.

use std::future::Future;
use std::path::PathBuf;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::models::Session;
use crate::store::SessionStore;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
  #[error("Failed to read session file: {0}")]
  Io(#[from] std::io::Error),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Unexpected HTTP status {0}")]
  Status(u16),

  #[error("Invalid JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("Session document is not an array")]
  NotAnArray,

  #[error("Invalid source location: {0}")]
  Location(String),
}

/// ---------------------------------------------------------------------------
/// Source Abstraction
/// ---------------------------------------------------------------------------

/// Anything that can hand over the raw JSON document for a session identifier
pub trait SessionSource {
  fn fetch(&self, id: &str) -> impl Future<Output = Result<Value, SourceError>> + Send;
}

/// Identifiers the source enumerates: `Workout1.json` .. `Workout{count}.json`
pub fn workout_file_names(count: usize) -> Vec<String> {
  (1..=count).map(|i| format!("Workout{}.json", i)).collect()
}

/// Session files in a local directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
  root: PathBuf,
}

impl DirectorySource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }
}

impl SessionSource for DirectorySource {
  async fn fetch(&self, id: &str) -> Result<Value, SourceError> {
    let bytes = tokio::fs::read(self.root.join(id)).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }
}

/// Session files served over HTTP beneath a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
  client: Client,
  base: Url,
}

impl HttpSource {
  pub fn new(base_url: &str) -> Result<Self, SourceError> {
    let mut base = Url::parse(base_url).map_err(|e| SourceError::Location(e.to_string()))?;

    // Url::join replaces the last segment unless the path ends in a slash
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    Ok(Self {
      client: Client::new(),
      base,
    })
  }

  fn url_for(&self, id: &str) -> Result<Url, SourceError> {
    self
      .base
      .join(id)
      .map_err(|e| SourceError::Location(e.to_string()))
  }
}

impl SessionSource for HttpSource {
  async fn fetch(&self, id: &str) -> Result<Value, SourceError> {
    let url = self.url_for(id)?;
    let response = self.client.get(url).send().await?;

    if !response.status().is_success() {
      return Err(SourceError::Status(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }
}

/// Either transport, picked from configuration
#[derive(Debug, Clone)]
pub enum AnySource {
  Directory(DirectorySource),
  Http(HttpSource),
}

impl AnySource {
  /// `http://` and `https://` locations are fetched remotely, anything else is a directory
  pub fn from_location(location: &str) -> Result<Self, SourceError> {
    if location.starts_with("http://") || location.starts_with("https://") {
      Ok(AnySource::Http(HttpSource::new(location)?))
    } else {
      Ok(AnySource::Directory(DirectorySource::new(location)))
    }
  }
}

impl SessionSource for AnySource {
  async fn fetch(&self, id: &str) -> Result<Value, SourceError> {
    match self {
      AnySource::Directory(source) => source.fetch(id).await,
      AnySource::Http(source) => source.fetch(id).await,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Sequential Load
/// ---------------------------------------------------------------------------

/// Diagnostics from one load pass. Never shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
  pub loaded: usize,
  pub skipped: Vec<String>,
}

/// Fetch every identifier in order and append the readable sessions.
///
/// Each fetch completes before the next starts, so store order always equals
/// identifier order regardless of per-source latency.
pub async fn load_sessions<S: SessionSource>(
  source: &S,
  ids: &[String],
  store: &mut SessionStore,
) -> LoadReport {
  let mut report = LoadReport::default();

  for id in ids {
    let result = source
      .fetch(id)
      .await
      .and_then(|document| Session::from_json(document).ok_or(SourceError::NotAnArray));

    match result {
      Ok(session) => {
        store.append(session);
        report.loaded += 1;
      }
      Err(e) => {
        tracing::warn!(id = %id, error = %e, "Skipping unreadable session");
        report.skipped.push(id.clone());
      }
    }
  }

  tracing::info!(
    loaded = report.loaded,
    skipped = report.skipped.len(),
    "Session load complete"
  );

  report
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
