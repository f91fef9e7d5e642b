use async_trait::async_trait;
use tracing::trace;

use super::{LookupError, SerpGateway, SerpQuery, SerpResponse};
use crate::config::SerpConfig;

/// reqwest-backed gateway to the SERP endpoint. One client, one bounded
/// timeout, no retries.
#[derive(Debug, Clone)]
pub struct HttpSerpClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpSerpClient {
    pub fn new(config: &SerpConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LookupError::Transport)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn params(&self, query: &SerpQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            SerpQuery::MapsSearch { query } => vec![
                ("engine", "google_maps".to_string()),
                ("type", "search".to_string()),
                ("q", query.clone()),
                ("hl", "en".to_string()),
            ],
            SerpQuery::PlaceDetails { place_id } => vec![
                ("engine", "google_maps".to_string()),
                ("type", "place".to_string()),
                ("place_id", place_id.clone()),
            ],
            SerpQuery::WebSearch { query } => vec![
                ("engine", "google".to_string()),
                ("q", query.clone()),
            ],
        };
        params.push(("api_key", self.api_key.clone()));
        params
    }
}

#[async_trait]
impl SerpGateway for HttpSerpClient {
    async fn query(&self, query: &SerpQuery) -> Result<SerpResponse, LookupError> {
        trace!(?query, "dispatching provider lookup");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&self.params(query))
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        response.json().await.map_err(LookupError::Malformed)
    }
}
