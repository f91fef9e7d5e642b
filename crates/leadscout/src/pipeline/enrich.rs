use std::sync::Arc;

use tracing::{debug, warn};

use super::candidate::{Candidate, FieldValue};
use crate::serp::{SerpGateway, SerpQuery, SerpResponse};

/// One conditional enrichment step. Execution predicates are first-class so
/// each stage's run-or-skip decision can be tested without a gateway.
trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this stage should run against the candidate's current state.
    fn applies(&self, candidate: &Candidate) -> bool;

    /// The provider query this stage issues. Only called when `applies`.
    fn query(&self, candidate: &Candidate) -> SerpQuery;

    /// Merge a successful (possibly empty) response into the candidate.
    fn merge(&self, candidate: &mut Candidate, response: SerpResponse);
}

/// Highest-trust stage: a detail lookup keyed by the provider place handle.
/// Exempt from fill-only-if-missing, so a value it returns replaces even a
/// field seeded by the candidate source.
struct PlaceDetailsStage;

impl Stage for PlaceDetailsStage {
    fn name(&self) -> &'static str {
        "place_details"
    }

    fn applies(&self, candidate: &Candidate) -> bool {
        candidate.place_id.is_some()
    }

    fn query(&self, candidate: &Candidate) -> SerpQuery {
        SerpQuery::PlaceDetails {
            place_id: candidate.place_id.clone().unwrap_or_default(),
        }
    }

    fn merge(&self, candidate: &mut Candidate, response: SerpResponse) {
        let Some(place) = response.place_results else {
            return;
        };

        match place.website {
            Some(website) => candidate.official_site.overwrite(website),
            None => candidate.official_site.note_absent(),
        }
        match place.phone {
            Some(phone) => candidate.phone.overwrite(phone),
            None => candidate.phone.note_absent(),
        }
        match place.address {
            Some(address) => candidate.address.overwrite(address),
            None => candidate.address.note_absent(),
        }
    }
}

/// Fallback for website and phone via the knowledge panel of a free-text
/// search. Strict fill-only-if-missing for both fields.
struct KnowledgeGraphStage;

impl Stage for KnowledgeGraphStage {
    fn name(&self) -> &'static str {
        "knowledge_graph"
    }

    fn applies(&self, candidate: &Candidate) -> bool {
        candidate.official_site.is_missing() || candidate.phone.is_missing()
    }

    fn query(&self, candidate: &Candidate) -> SerpQuery {
        SerpQuery::WebSearch {
            query: format!("{} {}", candidate.name, candidate.address.as_output()),
        }
    }

    fn merge(&self, candidate: &mut Candidate, response: SerpResponse) {
        let graph = response.knowledge_graph.unwrap_or_default();
        candidate.official_site.fill(graph.website);
        candidate.phone.fill(graph.phone);
    }
}

/// Last stage, always runs, and owns the three social fields outright: they
/// are reset before scanning so stale values never survive. The first
/// organic link matching each network wins, and one link can satisfy at most
/// one field.
struct SocialDiscoveryStage;

impl Stage for SocialDiscoveryStage {
    fn name(&self) -> &'static str {
        "social_discovery"
    }

    fn applies(&self, _candidate: &Candidate) -> bool {
        true
    }

    fn query(&self, candidate: &Candidate) -> SerpQuery {
        SerpQuery::WebSearch {
            query: format!(
                "{} {} facebook instagram linkedin",
                candidate.name,
                candidate.address.as_output()
            ),
        }
    }

    fn merge(&self, candidate: &mut Candidate, response: SerpResponse) {
        candidate.facebook = FieldValue::Unknown;
        candidate.instagram = FieldValue::Unknown;
        candidate.linkedin = FieldValue::Unknown;

        for result in response.organic_results {
            let Some(link) = result.link else {
                continue;
            };

            if link.contains("facebook.com") {
                if candidate.facebook.is_missing() {
                    candidate.facebook = FieldValue::known(link);
                }
            } else if link.contains("instagram.com") {
                if candidate.instagram.is_missing() {
                    candidate.instagram = FieldValue::known(link);
                }
            } else if link.contains("linkedin.com/company") {
                // Personal linkedin.com profiles deliberately do not match.
                if candidate.linkedin.is_missing() {
                    candidate.linkedin = FieldValue::known(link);
                }
            }
        }
    }
}

/// The enrichment pipeline: a fixed, ordered stage sequence over a single
/// owned candidate. Never fails; every stage degrades to "no change".
pub struct Enricher {
    gateway: Arc<dyn SerpGateway>,
    stages: Vec<Box<dyn Stage>>,
}

impl Enricher {
    pub fn new(gateway: Arc<dyn SerpGateway>) -> Self {
        Self {
            gateway,
            stages: vec![
                Box::new(PlaceDetailsStage),
                Box::new(KnowledgeGraphStage),
                Box::new(SocialDiscoveryStage),
            ],
        }
    }

    pub async fn enrich(&self, mut candidate: Candidate) -> Candidate {
        for stage in &self.stages {
            if !stage.applies(&candidate) {
                debug!(stage = stage.name(), name = %candidate.name, "stage skipped");
                continue;
            }

            match self.gateway.query(&stage.query(&candidate)).await {
                Ok(response) => stage.merge(&mut candidate, response),
                // An error and an empty success both mean "no data for this
                // stage"; the only difference is that an error leaves the
                // stage's fields untouched instead of marking them
                // known-empty. Later stages still run.
                Err(err) => warn!(
                    stage = stage.name(),
                    name = %candidate.name,
                    error = %err,
                    "lookup failed, continuing without it"
                ),
            }
        }

        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serp::{KnowledgeGraph, OrganicResult, PlaceResults};

    fn organic(links: &[&str]) -> SerpResponse {
        SerpResponse {
            organic_results: links
                .iter()
                .map(|link| OrganicResult {
                    link: Some((*link).to_string()),
                })
                .collect(),
            ..SerpResponse::default()
        }
    }

    #[test]
    fn place_details_stage_only_applies_with_a_handle() {
        let mut candidate = Candidate::named("Acme Dental");
        assert!(!PlaceDetailsStage.applies(&candidate));
        candidate.place_id = Some("pid-1".to_string());
        assert!(PlaceDetailsStage.applies(&candidate));
    }

    #[test]
    fn place_details_overwrites_a_seeded_phone() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.phone = FieldValue::known("111-1111");
        candidate.place_id = Some("pid-1".to_string());

        let response = SerpResponse {
            place_results: Some(PlaceResults {
                website: Some("https://acme.example".to_string()),
                phone: Some("222-2222".to_string()),
                address: None,
            }),
            ..SerpResponse::default()
        };
        PlaceDetailsStage.merge(&mut candidate, response);

        assert_eq!(candidate.phone, FieldValue::Known("222-2222".to_string()));
        assert_eq!(
            candidate.official_site,
            FieldValue::Known("https://acme.example".to_string())
        );
        // Queried but absent from the answer.
        assert_eq!(candidate.address, FieldValue::Empty);
    }

    #[test]
    fn place_details_leaves_candidate_untouched_without_place_results() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.phone = FieldValue::known("111-1111");
        PlaceDetailsStage.merge(&mut candidate, SerpResponse::default());
        assert_eq!(candidate.phone, FieldValue::Known("111-1111".to_string()));
        assert_eq!(candidate.official_site, FieldValue::Unknown);
    }

    #[test]
    fn knowledge_graph_stage_skips_fully_detailed_candidates() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.official_site = FieldValue::known("https://acme.example");
        candidate.phone = FieldValue::known("222-2222");
        assert!(!KnowledgeGraphStage.applies(&candidate));

        candidate.phone = FieldValue::Empty;
        assert!(KnowledgeGraphStage.applies(&candidate));
    }

    #[test]
    fn knowledge_graph_respects_existing_values() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.official_site = FieldValue::known("http://example.com");

        let response = SerpResponse {
            knowledge_graph: Some(KnowledgeGraph {
                website: Some("https://other.example".to_string()),
                phone: Some("333-3333".to_string()),
            }),
            ..SerpResponse::default()
        };
        KnowledgeGraphStage.merge(&mut candidate, response);

        assert_eq!(
            candidate.official_site,
            FieldValue::Known("http://example.com".to_string())
        );
        assert_eq!(candidate.phone, FieldValue::Known("333-3333".to_string()));
    }

    #[test]
    fn social_stage_takes_the_first_match_per_network() {
        let mut candidate = Candidate::named("Acme Dental");
        SocialDiscoveryStage.merge(
            &mut candidate,
            organic(&[
                "https://instagram.com/a",
                "https://facebook.com/b",
                "https://facebook.com/c",
            ]),
        );

        assert_eq!(
            candidate.facebook,
            FieldValue::Known("https://facebook.com/b".to_string())
        );
        assert_eq!(
            candidate.instagram,
            FieldValue::Known("https://instagram.com/a".to_string())
        );
        assert_eq!(candidate.linkedin, FieldValue::Unknown);
    }

    #[test]
    fn social_stage_ignores_personal_linkedin_profiles() {
        let mut candidate = Candidate::named("Acme Dental");
        SocialDiscoveryStage.merge(
            &mut candidate,
            organic(&[
                "https://linkedin.com/in/some-person",
                "https://linkedin.com/company/acme-dental",
            ]),
        );

        assert_eq!(
            candidate.linkedin,
            FieldValue::Known("https://linkedin.com/company/acme-dental".to_string())
        );
    }

    #[test]
    fn social_stage_resets_fields_before_scanning() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.facebook = FieldValue::known("https://facebook.com/stale");
        SocialDiscoveryStage.merge(&mut candidate, organic(&[]));
        assert_eq!(candidate.facebook, FieldValue::Unknown);
    }

    #[test]
    fn social_queries_carry_the_intent_keywords() {
        let candidate = Candidate::named("Acme Dental");
        let SerpQuery::WebSearch { query } = SocialDiscoveryStage.query(&candidate) else {
            panic!("social stage issues a web search");
        };
        assert_eq!(query, "Acme Dental N/A facebook instagram linkedin");
    }
}
