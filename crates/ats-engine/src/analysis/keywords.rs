//! Keyword Matcher — classifies job-description terms into buckets and
//! checks resume coverage for each.
//!
//! The required/preferred split is a documented, tunable heuristic over
//! textual delimiters (see `PREFERRED_MARKERS`); it does not try to
//! generalize to arbitrary phrasing beyond those triggers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::taxonomy::Taxonomy;
use crate::text::NormalizedDocument;

/// Phrases that open a "nice to have" region. Technical terms first seen at
/// or after the earliest marker are classified `preferred`.
const PREFERRED_MARKERS: &[&str] = &[
    "nice to have",
    "preferred",
    "bonus",
    "a plus",
    "plus",
    "good to have",
    "would be great",
];

/// Emphasis markers. A technical term first seen within
/// `REQUIRED_PROXIMITY` tokens after one of these stays `required` even past
/// the preferred delimiter.
const REQUIRED_MARKERS: &[&str] = &["required", "must have", "requirements"];
const REQUIRED_PROXIMITY: usize = 12;

/// Matched/missing coverage for one bucket. `matched` and `missing` are
/// disjoint and together hold every JD-derived term for the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: f64,
}

impl BucketResult {
    fn build(matched: BTreeSet<String>, missing: BTreeSet<String>) -> Self {
        let total = matched.len() + missing.len();
        let score = if total == 0 {
            // Vacuously satisfied; aggregation treats this as a risk signal.
            100.0
        } else {
            round1(100.0 * matched.len() as f64 / total as f64)
        };
        Self {
            matched: matched.into_iter().collect(),
            missing: missing.into_iter().collect(),
            score,
        }
    }

    /// True when the JD produced no candidate terms for this bucket.
    pub fn is_vacuous(&self) -> bool {
        self.matched.is_empty() && self.missing.is_empty()
    }
}

/// Coverage results for the four keyword buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBuckets {
    pub required: BucketResult,
    pub preferred: BucketResult,
    pub industry: BucketResult,
    pub soft_skills: BucketResult,
}

impl KeywordBuckets {
    /// Count of vacuous technical buckets (required, preferred, industry) —
    /// the confidence deduction input. Soft skills are excluded because many
    /// legitimate JDs simply never name them.
    pub fn vacuous_technical_buckets(&self) -> usize {
        [&self.required, &self.preferred, &self.industry]
            .iter()
            .filter(|b| b.is_vacuous())
            .count()
    }
}

/// Classifies JD terms into buckets and checks resume coverage.
pub fn match_keywords(
    resume: &NormalizedDocument,
    jd: &NormalizedDocument,
    taxonomy: &Taxonomy,
) -> KeywordBuckets {
    // Candidate technical terms with their first JD position (canonical or
    // any alias, whichever occurs first).
    let mut technical: Vec<(String, usize)> = Vec::new();
    for term in taxonomy.technical_terms() {
        if let Some(pos) = earliest_occurrence(jd, term, taxonomy) {
            technical.push((term.to_string(), pos));
        }
    }

    let delimiter = PREFERRED_MARKERS
        .iter()
        .filter_map(|m| jd.first_occurrence(m))
        .min();
    // Emphasis markers only matter inside the preferred region: before the
    // delimiter every technical term is required anyway.
    let required_positions: Vec<usize> = REQUIRED_MARKERS
        .iter()
        .filter_map(|m| jd.first_occurrence(m))
        .filter(|&rp| delimiter.map_or(true, |d| rp >= d))
        .collect();

    let mut required_terms = BTreeSet::new();
    let mut preferred_terms = BTreeSet::new();
    for (term, pos) in technical {
        let emphasized = required_positions
            .iter()
            .any(|&rp| pos >= rp && pos - rp <= REQUIRED_PROXIMITY);
        let preferred = match delimiter {
            Some(d) if !emphasized && pos >= d => true,
            _ => false,
        };
        if preferred {
            preferred_terms.insert(term);
        } else {
            required_terms.insert(term);
        }
    }

    let industry_terms = industry_terms_in(jd, taxonomy);
    let soft_terms: BTreeSet<String> = taxonomy
        .soft_terms()
        .filter(|t| found_in(jd, t, taxonomy))
        .map(str::to_string)
        .collect();

    KeywordBuckets {
        required: coverage(resume, required_terms, taxonomy),
        preferred: coverage(resume, preferred_terms, taxonomy),
        industry: coverage(resume, industry_terms, taxonomy),
        soft_skills: coverage(resume, soft_terms, taxonomy),
    }
}

/// Industry-taxonomy terms present in a document. Shared with the semantic
/// estimator's industry-alignment sub-score.
pub(crate) fn industry_terms_in(doc: &NormalizedDocument, taxonomy: &Taxonomy) -> BTreeSet<String> {
    taxonomy
        .industry_terms()
        .filter(|t| found_in(doc, t, taxonomy))
        .map(str::to_string)
        .collect()
}

/// A term is present if its canonical form or any registered alias appears.
fn found_in(doc: &NormalizedDocument, canonical: &str, taxonomy: &Taxonomy) -> bool {
    doc.contains_term(canonical) || taxonomy.aliases_of(canonical).any(|a| doc.contains_term(a))
}

fn earliest_occurrence(
    doc: &NormalizedDocument,
    canonical: &str,
    taxonomy: &Taxonomy,
) -> Option<usize> {
    std::iter::once(canonical)
        .chain(taxonomy.aliases_of(canonical))
        .filter_map(|form| doc.first_occurrence(form))
        .min()
}

fn coverage(
    resume: &NormalizedDocument,
    candidates: BTreeSet<String>,
    taxonomy: &Taxonomy,
) -> BucketResult {
    let mut matched = BTreeSet::new();
    let mut missing = BTreeSet::new();
    for term in candidates {
        if found_in(resume, &term, taxonomy) {
            matched.insert(term);
        } else {
            missing.insert(term);
        }
    }
    BucketResult::build(matched, missing)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    fn tax() -> Taxonomy {
        Taxonomy::builtin()
    }

    #[test]
    fn test_scenario_a_partial_required_coverage() {
        let resume = normalize("Skills: Python, JavaScript, Docker");
        let jd = normalize("We require Python, JavaScript, and AWS experience.");
        let buckets = match_keywords(&resume, &jd, &tax());

        assert_eq!(buckets.required.matched, vec!["javascript", "python"]);
        assert_eq!(buckets.required.missing, vec!["aws"]);
        assert!((buckets.required.score - 66.7).abs() < 0.05);
    }

    #[test]
    fn test_no_delimiter_defaults_everything_to_required() {
        let resume = normalize("python");
        let jd = normalize("Looking for python and kubernetes engineers.");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert!(buckets.preferred.is_vacuous());
        assert!(buckets.required.matched.contains(&"python".to_string()));
        assert!(buckets.required.missing.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_nice_to_have_terms_go_to_preferred() {
        let resume = normalize("I know python.");
        let jd = normalize("Required: python and sql. Nice to have: kubernetes and terraform.");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert!(buckets.required.matched.contains(&"python".to_string()));
        assert!(buckets.required.missing.contains(&"sql".to_string()));
        assert!(buckets.preferred.missing.contains(&"kubernetes".to_string()));
        assert!(buckets.preferred.missing.contains(&"terraform".to_string()));
    }

    #[test]
    fn test_must_have_after_delimiter_stays_required() {
        let jd = normalize("Nice to have: a sense of humor. Filler words to push the next part well past the proximity window of the marker phrase here. Must have docker.");
        let resume = normalize("docker");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert!(
            buckets.required.matched.contains(&"docker".to_string()),
            "emphasized term must stay required past the delimiter"
        );
    }

    #[test]
    fn test_synonym_in_resume_counts_as_match() {
        let resume = normalize("Five years of k8s and golang in production.");
        let jd = normalize("We need kubernetes and go.");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert!(buckets.required.matched.contains(&"kubernetes".to_string()));
        assert!(buckets.required.matched.contains(&"go".to_string()));
        assert!(buckets.required.missing.is_empty());
    }

    #[test]
    fn test_industry_and_soft_buckets_ignore_position() {
        let resume = normalize("Agile teams, strong communication.");
        let jd = normalize("Nice to have: agile experience, machine learning, communication, leadership.");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert!(buckets.industry.matched.contains(&"agile".to_string()));
        assert!(buckets.industry.missing.contains(&"machine learning".to_string()));
        assert!(buckets.soft_skills.matched.contains(&"communication".to_string()));
        assert!(buckets.soft_skills.missing.contains(&"leadership".to_string()));
    }

    #[test]
    fn test_unrecognizable_jd_yields_vacuous_buckets() {
        let resume = normalize("python developer with docker");
        let jd = normalize("We bake artisanal sourdough bread every morning at dawn.");
        let buckets = match_keywords(&resume, &jd, &tax());
        assert_eq!(buckets.vacuous_technical_buckets(), 3);
        assert_eq!(buckets.required.score, 100.0);
        assert_eq!(buckets.preferred.score, 100.0);
        assert_eq!(buckets.industry.score, 100.0);
    }

    #[test]
    fn test_matched_and_missing_are_disjoint() {
        let resume = normalize("python java docker aws react");
        let jd = normalize("python java rust go docker kubernetes aws gcp react vue");
        let buckets = match_keywords(&resume, &jd, &tax());
        for bucket in [&buckets.required, &buckets.preferred, &buckets.industry] {
            for m in &bucket.matched {
                assert!(!bucket.missing.contains(m), "{m} in both matched and missing");
            }
        }
    }

    #[test]
    fn test_empty_documents_do_not_panic() {
        let empty = normalize("");
        let buckets = match_keywords(&empty, &empty, &tax());
        assert_eq!(buckets.vacuous_technical_buckets(), 3);
    }

    #[test]
    fn test_custom_taxonomy_is_honored() {
        let custom = Taxonomy::builder()
            .technical(crate::taxonomy::TechDomain::Languages, ["fortran"])
            .build();
        let resume = normalize("decades of fortran");
        let jd = normalize("fortran and python wanted");
        let buckets = match_keywords(&resume, &jd, &custom);
        // python is unknown to the custom taxonomy
        assert_eq!(buckets.required.matched, vec!["fortran"]);
        assert!(buckets.required.missing.is_empty());
    }
}
