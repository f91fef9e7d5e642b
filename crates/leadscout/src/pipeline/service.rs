use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::enrich::Enricher;
use super::source::CandidateSource;
use super::validator::validate;
use crate::config::OutputConfig;
use crate::serp::SerpGateway;
use crate::storage::{CsvStore, StorageError};

/// One batch request, shared by the CLI and the HTTP surface.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub niche: String,
    pub location: String,
    pub limit: usize,
}

impl ScrapeRequest {
    pub const DEFAULT_LIMIT: usize = 20;
}

/// What a completed batch reports back.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub saved: usize,
    pub file: PathBuf,
}

/// Wires candidate discovery, enrichment, validation, and storage into one
/// batch run. Everything upstream of the store degrades gracefully; only a
/// write failure aborts.
pub struct LeadScoutService {
    source: CandidateSource,
    enricher: Enricher,
    store: CsvStore,
    output: OutputConfig,
}

impl LeadScoutService {
    pub fn new(gateway: Arc<dyn SerpGateway>, output: OutputConfig) -> Self {
        Self {
            source: CandidateSource::new(gateway.clone()),
            enricher: Enricher::new(gateway),
            store: CsvStore,
            output,
        }
    }

    pub async fn run(&self, request: &ScrapeRequest) -> Result<ScrapeOutcome, StorageError> {
        // Headers exist before any lookup runs, so even a run that finds
        // nothing leaves a well-formed file behind.
        self.store.ensure_exists(&self.output.csv_path)?;

        let candidates = self
            .source
            .find(&request.niche, &request.location, request.limit)
            .await;
        let found = candidates.len();
        info!(found, niche = %request.niche, location = %request.location, "search complete");

        let mut accepted = Vec::with_capacity(found);
        for (index, candidate) in candidates.into_iter().enumerate() {
            let enriched = self.enricher.enrich(candidate).await;

            if validate(&enriched) {
                accepted.push(enriched);
            } else {
                debug!("dropped a candidate without a usable name");
            }

            // Fixed pacing between candidates to stay under provider rate
            // limits; skipped after the last one.
            if index + 1 < found && !self.output.candidate_delay.is_zero() {
                tokio::time::sleep(self.output.candidate_delay).await;
            }
        }

        let saved = self.store.write(&self.output.csv_path, &accepted)?;
        info!(saved, file = %self.output.csv_path.display(), "batch written");

        Ok(ScrapeOutcome {
            saved,
            file: self.output.csv_path.clone(),
        })
    }
}
