//! ClinVar review status to gold-star confidence score
//!
//! ClinVar encodes the review status of a variant interpretation in the
//! `CLNREVSTAT` INFO field, with spaces replaced by underscores. Downstream
//! annotation maps each status to a 0-4 star rating.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Review status -> gold stars, exact keys as they appear in the VCF
pub const CLINVAR_GOLD_STARS: [(&str, u8); 8] = [
    ("no_interpretation_for_the_single_variant", 0),
    ("no_assertion_provided", 0),
    ("no_assertion_criteria_provided", 0),
    ("criteria_provided,_single_submitter", 1),
    ("criteria_provided,_conflicting_interpretations", 1),
    ("criteria_provided,_multiple_submitters,_no_conflicts", 2),
    ("reviewed_by_expert_panel", 3),
    ("practice_guideline", 4),
];

static GOLD_STARS_LOOKUP: LazyLock<HashMap<&'static str, u8>> =
    LazyLock::new(|| CLINVAR_GOLD_STARS.into_iter().collect());

/// Star rating for a review status, `None` for statuses outside the table
pub fn gold_stars(review_status: &str) -> Option<u8> {
    GOLD_STARS_LOOKUP.get(review_status).copied()
}

/// The full lookup table
pub fn gold_stars_lookup() -> &'static HashMap<&'static str, u8> {
    &GOLD_STARS_LOOKUP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(gold_stars("no_assertion_provided"), Some(0));
        assert_eq!(
            gold_stars("criteria_provided,_multiple_submitters,_no_conflicts"),
            Some(2)
        );
        assert_eq!(gold_stars("practice_guideline"), Some(4));
        assert_eq!(gold_stars("reviewed_by_expert_panel"), Some(3));
    }

    #[test]
    fn test_lookup_is_exact_match() {
        assert_eq!(gold_stars("Practice_Guideline"), None);
        assert_eq!(gold_stars("practice guideline"), None);
        assert_eq!(gold_stars(""), None);
    }

    #[test]
    fn test_table_is_complete() {
        let lookup = gold_stars_lookup();
        assert_eq!(lookup.len(), 8);
        assert!(lookup.values().all(|stars| *stars <= 4));
    }
}
