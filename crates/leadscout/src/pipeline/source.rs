use std::sync::Arc;

use tracing::{debug, warn};

use super::candidate::{Candidate, FieldValue};
use crate::serp::{LocalResult, SerpGateway, SerpQuery};

/// Discovers raw candidates for a niche and location via one maps search.
pub struct CandidateSource {
    gateway: Arc<dyn SerpGateway>,
}

impl CandidateSource {
    pub fn new(gateway: Arc<dyn SerpGateway>) -> Self {
        Self { gateway }
    }

    /// Returns up to `limit` candidates, or none at all when the lookup
    /// fails. A failed search is a degraded run, never an error.
    pub async fn find(&self, niche: &str, location: &str, limit: usize) -> Vec<Candidate> {
        let query = SerpQuery::MapsSearch {
            query: format!("{niche} in {location}"),
        };

        let response = match self.gateway.query(&query).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%niche, %location, error = %err, "candidate search failed");
                return Vec::new();
            }
        };

        let mut candidates: Vec<Candidate> = response
            .local_results
            .into_iter()
            .map(candidate_from)
            .collect();

        // The provider decides how many results come back; the limit is
        // enforced here by truncation.
        candidates.truncate(limit);
        debug!(count = candidates.len(), %niche, %location, "candidates discovered");
        candidates
    }
}

fn candidate_from(result: LocalResult) -> Candidate {
    Candidate {
        name: result.title.unwrap_or_default(),
        address: FieldValue::from_provider(result.address),
        phone: FieldValue::from_provider(result.phone),
        place_id: result.place_id,
        ..Candidate::default()
    }
}
