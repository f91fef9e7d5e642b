use super::candidate::Candidate;

/// Acceptance gate before persistence. Every other field defaults to a
/// value, so the only thing that can disqualify a candidate is a missing
/// name: a business record without a name is not a usable lead.
pub fn validate(candidate: &Candidate) -> bool {
    !candidate.name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::candidate::FieldValue;

    #[test]
    fn rejects_an_empty_name() {
        assert!(!validate(&Candidate::named("")));
        assert!(!validate(&Candidate::named("   ")));
    }

    #[test]
    fn accepts_a_named_candidate_full_of_sentinels() {
        assert!(validate(&Candidate::named("Acme Dental")));
    }

    #[test]
    fn enriched_fields_do_not_change_the_verdict() {
        let mut candidate = Candidate::named("Acme Dental");
        candidate.phone = FieldValue::known("555-0100");
        assert!(validate(&candidate));
    }
}
