use serde::{Deserialize, Serialize};

/// Marker written for any field no lookup managed to populate. Internal code
/// works with [`FieldValue`]; the sentinel only appears at the output
/// boundary.
pub const SENTINEL: &str = "N/A";

/// Tri-state enrichment field.
///
/// `Unknown` means no stage has looked, `Empty` means a lookup answered but
/// offered nothing, `Known` holds an actual value. Both non-`Known` states
/// serialize as the sentinel; keeping them apart preserves the difference
/// between "lookup failed" and "lookup found nothing" for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    #[default]
    Unknown,
    Empty,
    Known(String),
}

impl FieldValue {
    /// Wrap a provider value, demoting blank strings to `Empty`.
    pub fn known(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Empty
        } else {
            Self::Known(value)
        }
    }

    pub fn from_provider(value: Option<String>) -> Self {
        match value {
            Some(value) => Self::known(value),
            None => Self::Unknown,
        }
    }

    /// True unless an actual value is held. This is the predicate behind
    /// every fill-only-if-missing decision.
    pub fn is_missing(&self) -> bool {
        !matches!(self, Self::Known(_))
    }

    /// Replace whatever is held. Reserved for the highest-trust stage.
    pub fn overwrite(&mut self, value: impl Into<String>) {
        *self = Self::known(value);
    }

    /// Merge a lookup result under fill-only-if-missing rules: an existing
    /// value is kept, an offered value fills the gap, and an answer that
    /// offered nothing records the field as known-empty.
    pub fn fill(&mut self, value: Option<String>) {
        if !self.is_missing() {
            return;
        }
        match value {
            Some(value) => *self = Self::known(value),
            None => self.note_absent(),
        }
    }

    /// Record that a successful lookup had nothing for this field.
    pub fn note_absent(&mut self) {
        if matches!(self, Self::Unknown) {
            *self = Self::Empty;
        }
    }

    pub fn as_output(&self) -> &str {
        match self {
            Self::Known(value) => value,
            Self::Unknown | Self::Empty => SENTINEL,
        }
    }
}

/// A business record flowing from raw discovery through enrichment to
/// validated output. Owned exclusively by one pipeline invocation; stages
/// mutate it in place.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub name: String,
    pub address: FieldValue,
    pub phone: FieldValue,
    pub official_site: FieldValue,
    pub facebook: FieldValue,
    pub instagram: FieldValue,
    pub linkedin: FieldValue,
    /// Opaque provider handle enabling the high-trust detail lookup.
    pub place_id: Option<String>,
}

impl Candidate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The fixed eight-column shape persisted for every candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub official_site: String,
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
    pub lookup_handle: String,
}

impl From<&Candidate> for CandidateRow {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            address: candidate.address.as_output().to_string(),
            phone: candidate.phone.as_output().to_string(),
            official_site: candidate.official_site.as_output().to_string(),
            facebook: candidate.facebook.as_output().to_string(),
            instagram: candidate.instagram.as_output().to_string(),
            linkedin: candidate.linkedin.as_output().to_string(),
            lookup_handle: candidate
                .place_id
                .clone()
                .unwrap_or_else(|| SENTINEL.to_string()),
        }
    }
}
