pub mod candidate;

mod enrich;
mod service;
mod source;
mod validator;

pub use candidate::{Candidate, CandidateRow, FieldValue};
pub use enrich::Enricher;
pub use service::{LeadScoutService, ScrapeOutcome, ScrapeRequest};
pub use source::CandidateSource;
pub use validator::validate;
