use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadscout::config::OutputConfig;
use leadscout::pipeline::{CandidateRow, LeadScoutService, ScrapeRequest};
use leadscout::serp::{LookupError, SerpGateway, SerpQuery, SerpResponse};

/// Provider stub for whole-batch runs: a fixed maps answer, optional social
/// links, everything else failing.
struct BatchGateway {
    maps: &'static str,
    social: Option<&'static str>,
}

#[async_trait]
impl SerpGateway for BatchGateway {
    async fn query(&self, query: &SerpQuery) -> Result<SerpResponse, LookupError> {
        let payload = match query {
            SerpQuery::MapsSearch { .. } => Some(self.maps),
            SerpQuery::WebSearch { query } if query.ends_with("facebook instagram linkedin") => {
                self.social
            }
            _ => None,
        };

        match payload {
            Some(json) => Ok(serde_json::from_str(json).expect("stub payload decodes")),
            None => Err(LookupError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        }
    }
}

fn output_in(dir: &tempfile::TempDir) -> (OutputConfig, PathBuf) {
    let path = dir.path().join("output").join("business_details.csv");
    (
        OutputConfig {
            csv_path: path.clone(),
            candidate_delay: Duration::ZERO,
        },
        path,
    )
}

fn request() -> ScrapeRequest {
    ScrapeRequest {
        niche: "Dentist".to_string(),
        location: "Surat".to_string(),
        limit: ScrapeRequest::DEFAULT_LIMIT,
    }
}

fn read_rows(path: &PathBuf) -> Vec<CandidateRow> {
    let mut reader = csv::Reader::from_path(path).expect("output parses");
    reader
        .deserialize()
        .collect::<Result<Vec<CandidateRow>, _>>()
        .expect("rows decode")
}

#[tokio::test]
async fn acme_dental_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, path) = output_in(&dir);

    let gateway = Arc::new(BatchGateway {
        maps: r#"{ "local_results": [ { "title": "Acme Dental", "address": "1 Main St" } ] }"#,
        social: Some(r#"{ "organic_results": [ { "link": "https://facebook.com/acmedental" } ] }"#),
    });
    let service = LeadScoutService::new(gateway, output);

    let outcome = service.run(&request()).await.expect("batch completes");
    assert_eq!(outcome.saved, 1);
    assert_eq!(outcome.file, path);

    let rows = read_rows(&path);
    assert_eq!(
        rows,
        vec![CandidateRow {
            name: "Acme Dental".to_string(),
            address: "1 Main St".to_string(),
            phone: "N/A".to_string(),
            official_site: "N/A".to_string(),
            facebook: "https://facebook.com/acmedental".to_string(),
            instagram: "N/A".to_string(),
            linkedin: "N/A".to_string(),
            lookup_handle: "N/A".to_string(),
        }]
    );
}

#[tokio::test]
async fn batch_preserves_input_order_and_drops_nameless_candidates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, path) = output_in(&dir);

    let gateway = Arc::new(BatchGateway {
        maps: r#"{ "local_results": [
            { "title": "Alpha Dental" },
            { "address": "no title here" },
            { "title": "Beta Dental" },
            { "title": "Gamma Dental" }
        ] }"#,
        social: None,
    });
    let service = LeadScoutService::new(gateway, output);

    let outcome = service.run(&request()).await.expect("batch completes");
    assert_eq!(outcome.saved, 3);

    let names: Vec<String> = read_rows(&path).into_iter().map(|row| row.name).collect();
    assert_eq!(names, ["Alpha Dental", "Beta Dental", "Gamma Dental"]);
}

#[tokio::test]
async fn failed_search_still_produces_a_headed_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, path) = output_in(&dir);

    struct DownGateway;
    #[async_trait]
    impl SerpGateway for DownGateway {
        async fn query(&self, _query: &SerpQuery) -> Result<SerpResponse, LookupError> {
            Err(LookupError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }

    let service = LeadScoutService::new(Arc::new(DownGateway), output);
    let outcome = service.run(&request()).await.expect("run still completes");
    assert_eq!(outcome.saved, 0);

    let content = std::fs::read_to_string(&path).expect("file exists");
    assert_eq!(
        content.trim_end(),
        "name,address,phone,official_site,facebook,instagram,linkedin,lookup_handle"
    );
}

#[tokio::test]
async fn limit_caps_the_written_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, path) = output_in(&dir);

    let gateway = Arc::new(BatchGateway {
        maps: r#"{ "local_results": [
            { "title": "One" }, { "title": "Two" }, { "title": "Three" }
        ] }"#,
        social: None,
    });
    let service = LeadScoutService::new(gateway, output);

    let outcome = service
        .run(&ScrapeRequest {
            limit: 2,
            ..request()
        })
        .await
        .expect("batch completes");

    assert_eq!(outcome.saved, 2);
    assert_eq!(read_rows(&path).len(), 2);
}
