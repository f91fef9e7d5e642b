use serde::Deserialize;

/// The subset of a SERP payload the pipeline reads. Every section is
/// optional; a response carrying none of them is indistinguishable from a
/// failed lookup as far as the enrichment stages are concerned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerpResponse {
    #[serde(default)]
    pub local_results: Vec<LocalResult>,
    #[serde(default)]
    pub place_results: Option<PlaceResults>,
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

impl SerpResponse {
    pub fn is_empty(&self) -> bool {
        self.local_results.is_empty()
            && self.place_results.is_none()
            && self.knowledge_graph.is_none()
            && self.organic_results.is_empty()
    }
}

/// One hit from a maps search: a place-like result with a follow-up handle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalResult {
    pub title: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub place_id: Option<String>,
}

/// Detail payload for a place-identifier lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResults {
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Knowledge-panel payload attached to a free-text search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    pub link: Option<String>,
}
