mod client;
mod models;

pub use client::HttpSerpClient;
pub use models::{KnowledgeGraph, LocalResult, OrganicResult, PlaceResults, SerpResponse};

use async_trait::async_trait;

/// The three query shapes the provider has to answer for this pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerpQuery {
    /// Niche-and-location search returning place-like results.
    MapsSearch { query: String },
    /// Higher-confidence detail lookup by provider place handle.
    PlaceDetails { place_id: String },
    /// Free-text web search returning a knowledge panel or organic links.
    WebSearch { query: String },
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("search provider unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("search provider answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("search provider sent a malformed payload: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// One call to the external search provider.
///
/// Failures surface as `Err(LookupError)` so callers can see them, but the
/// enrichment stages deliberately treat an error and an empty success the
/// same way: both mean "no data for this stage". The trait seam exists so
/// tests can script provider behavior without a network.
#[async_trait]
pub trait SerpGateway: Send + Sync {
    async fn query(&self, query: &SerpQuery) -> Result<SerpResponse, LookupError>;
}
