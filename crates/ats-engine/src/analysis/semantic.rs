//! Semantic Similarity Estimator — pluggable backend strategy with a
//! token-overlap fallback.
//!
//! The primary backend builds frequency × inverse-document-frequency vectors
//! over the two-document corpus and takes cosine similarity. When either side
//! is too short to vectorize the estimator falls back to Jaccard overlap and
//! records that it did, so the aggregator can lower confidence. There is
//! exactly one source of truth for scoring semantics: swapping the backend
//! never touches aggregation or suggestion logic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::analysis::experience::{infer_seniority, tier_alignment_score, verb_sentences};
use crate::analysis::keywords::industry_terms_in;
use crate::taxonomy::Taxonomy;
use crate::text::{is_stopword, NormalizedDocument};

/// Minimum meaningful tokens per side for tf-idf vectorization.
const MIN_VECTOR_TOKENS: usize = 3;

/// Sub-score weights: title 30%, industry 30%, experience 20%,
/// responsibility 20%.
const W_TITLE: f64 = 0.30;
const W_INDUSTRY: f64 = 0.30;
const W_EXPERIENCE: f64 = 0.20;
const W_RESPONSIBILITY: f64 = 0.20;

/// Similarity strategy over normalized token streams.
///
/// Returns `None` when the pair is degenerate for this backend (too little
/// text, zero-norm vectors); the estimator then takes the fallback path.
pub trait SimilarityBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn similarity(&self, a: &[String], b: &[String]) -> Option<f64>;
}

/// Term-frequency × smoothed inverse-document-frequency cosine similarity
/// over the two-document corpus. Smoothed idf (`ln((1+n)/(1+df)) + 1`) keeps
/// shared vocabulary from vanishing in a two-document corpus.
pub struct TfIdfBackend;

impl SimilarityBackend for TfIdfBackend {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn similarity(&self, a: &[String], b: &[String]) -> Option<f64> {
        let a_terms = meaningful(a);
        let b_terms = meaningful(b);
        if a_terms.len() < MIN_VECTOR_TOKENS || b_terms.len() < MIN_VECTOR_TOKENS {
            return None;
        }

        let a_counts = counts(&a_terms);
        let b_counts = counts(&b_terms);
        let vocab: BTreeSet<&str> = a_counts.keys().chain(b_counts.keys()).copied().collect();

        let n_docs = 2.0_f64;
        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for term in vocab {
            let df = (a_counts.contains_key(term) as u8 + b_counts.contains_key(term) as u8) as f64;
            let idf = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
            let wa = *a_counts.get(term).unwrap_or(&0) as f64 / a_terms.len() as f64 * idf;
            let wb = *b_counts.get(term).unwrap_or(&0) as f64 / b_terms.len() as f64 * idf;
            dot += wa * wb;
            norm_a += wa * wa;
            norm_b += wb * wb;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }
        Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
    }
}

/// Jaccard token-set overlap. Always available; serves as the fallback
/// when the primary backend declines a pair.
pub struct OverlapBackend;

impl SimilarityBackend for OverlapBackend {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn similarity(&self, a: &[String], b: &[String]) -> Option<f64> {
        let sa: BTreeSet<&str> = a.iter().map(String::as_str).collect();
        let sb: BTreeSet<&str> = b.iter().map(String::as_str).collect();
        if sa.is_empty() || sb.is_empty() {
            return Some(0.0);
        }
        let intersection = sa.intersection(&sb).count() as f64;
        let union = sa.union(&sb).count() as f64;
        Some(intersection / union)
    }
}

/// Semantic sub-scores, each in [0,100], plus the combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    pub job_title_match: f64,
    pub industry_alignment: f64,
    pub experience_alignment: f64,
    pub responsibility_match: f64,
    pub score: f64,
    /// Backend that produced the document-level similarity, for transparency.
    pub backend: String,
    /// True when the document-level similarity took the fallback path.
    pub used_fallback: bool,
}

/// Holds the primary strategy and the always-available fallback.
pub struct SemanticEstimator {
    primary: Box<dyn SimilarityBackend>,
    fallback: OverlapBackend,
}

impl Default for SemanticEstimator {
    fn default() -> Self {
        Self::new(Box::new(TfIdfBackend))
    }
}

impl SemanticEstimator {
    pub fn new(primary: Box<dyn SimilarityBackend>) -> Self {
        Self {
            primary,
            fallback: OverlapBackend,
        }
    }

    pub fn estimate(
        &self,
        resume: &NormalizedDocument,
        jd: &NormalizedDocument,
        job_title: &str,
        taxonomy: &Taxonomy,
    ) -> SemanticAnalysis {
        // Title-like tokens are short by construction, so they are compared
        // with plain overlap; the fallback flag tracks only the
        // document-level path.
        let title_doc;
        let title_tokens: &[String] = if job_title.trim().is_empty() {
            jd.title_tokens()
        } else {
            title_doc = crate::text::normalize(job_title);
            title_doc.tokens()
        };
        let job_title_match = scale(
            self.fallback
                .similarity(title_tokens, resume.title_tokens())
                .unwrap_or(0.0),
        );

        let resume_industry = industry_terms_in(resume, taxonomy);
        let jd_industry = industry_terms_in(jd, taxonomy);
        let industry_alignment = set_alignment(&resume_industry, &jd_industry);

        let experience_alignment =
            tier_alignment_score(infer_seniority(resume), infer_seniority(jd));

        let (doc_similarity, used_fallback, backend) = self.doc_similarity(resume, jd);

        let resume_resp: Vec<String> = sentence_tokens(resume);
        let jd_resp: Vec<String> = sentence_tokens(jd);
        let responsibility_match = if resume_resp.is_empty() || jd_resp.is_empty() {
            scale(doc_similarity)
        } else {
            scale(
                self.fallback
                    .similarity(&resume_resp, &jd_resp)
                    .unwrap_or(0.0),
            )
        };

        let score = round1(
            W_TITLE * job_title_match
                + W_INDUSTRY * industry_alignment
                + W_EXPERIENCE * experience_alignment
                + W_RESPONSIBILITY * responsibility_match,
        );
        debug!(backend, used_fallback, score, "semantic estimate");

        SemanticAnalysis {
            job_title_match: round1(job_title_match),
            industry_alignment: round1(industry_alignment),
            experience_alignment: round1(experience_alignment),
            responsibility_match: round1(responsibility_match),
            score,
            backend: backend.to_string(),
            used_fallback,
        }
    }

    /// Whole-document similarity via the primary backend, overlap on failure.
    fn doc_similarity(
        &self,
        resume: &NormalizedDocument,
        jd: &NormalizedDocument,
    ) -> (f64, bool, &'static str) {
        match self.primary.similarity(resume.tokens(), jd.tokens()) {
            Some(sim) => (sanitize(sim), false, self.primary.name()),
            None => {
                let sim = self
                    .fallback
                    .similarity(resume.tokens(), jd.tokens())
                    .unwrap_or(0.0);
                (sanitize(sim), true, self.fallback.name())
            }
        }
    }
}

/// Overlap of two term sets; an empty union is vacuously aligned.
fn set_alignment(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    scale(intersection / union)
}

/// Token union of action-verb-bearing sentences.
fn sentence_tokens(doc: &NormalizedDocument) -> Vec<String> {
    verb_sentences(doc)
        .iter()
        .flat_map(|s| s.tokens.iter().cloned())
        .collect()
}

fn meaningful(tokens: &[String]) -> Vec<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| t.len() > 2 && !is_stopword(t))
        .collect()
}

fn counts<'a>(terms: &[&'a str]) -> BTreeMap<&'a str, usize> {
    let mut map = BTreeMap::new();
    for t in terms {
        *map.entry(*t).or_insert(0) += 1;
    }
    map
}

/// Clamp a raw similarity into [0,1] (NaN and negatives become 0) and scale
/// to [0,100].
fn scale(sim: f64) -> f64 {
    sanitize(sim) * 100.0
}

fn sanitize(sim: f64) -> f64 {
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    const RESUME: &str = "Senior Backend Engineer\n\nLed migrations to kubernetes. Developed python services for machine learning workloads. Built streaming pipelines with kafka.";
    const JD: &str = "Senior Backend Engineer\n\nYou will have led kubernetes migrations and developed python services. Machine learning experience required.";

    #[test]
    fn test_tfidf_identical_is_one() {
        let doc = normalize("python developer building distributed backend services");
        let sim = TfIdfBackend
            .similarity(doc.tokens(), doc.tokens())
            .expect("not degenerate");
        assert!((sim - 1.0).abs() < 1e-9, "sim was {sim}");
    }

    #[test]
    fn test_tfidf_disjoint_is_zero() {
        let a = normalize("python django postgresql backend");
        let b = normalize("marketing outreach campaigns branding");
        let sim = TfIdfBackend
            .similarity(a.tokens(), b.tokens())
            .expect("not degenerate");
        assert!(sim.abs() < 0.35, "disjoint docs should score low, got {sim}");
    }

    #[test]
    fn test_tfidf_degenerate_returns_none() {
        let tiny = normalize("python");
        let full = normalize("a long enough description of backend work with python services");
        assert!(TfIdfBackend.similarity(tiny.tokens(), full.tokens()).is_none());
        assert!(TfIdfBackend.similarity(full.tokens(), tiny.tokens()).is_none());
    }

    #[test]
    fn test_overlap_bounds() {
        let a = normalize("python rust go");
        let b = normalize("python java");
        let sim = OverlapBackend.similarity(a.tokens(), b.tokens()).unwrap();
        assert!((sim - 0.25).abs() < 1e-9); // 1 shared of 4 distinct
        let empty = normalize("");
        assert_eq!(OverlapBackend.similarity(empty.tokens(), b.tokens()), Some(0.0));
    }

    #[test]
    fn test_identical_documents_score_high() {
        let resume = normalize(RESUME);
        let jd = normalize(RESUME);
        let analysis =
            SemanticEstimator::default().estimate(&resume, &jd, "", &Taxonomy::builtin());
        assert!(analysis.score >= 95.0, "score was {}", analysis.score);
        assert!(!analysis.used_fallback);
        assert_eq!(analysis.backend, "tfidf");
    }

    #[test]
    fn test_similar_documents_beat_unrelated_ones() {
        let resume = normalize(RESUME);
        let jd = normalize(JD);
        let unrelated = normalize("We bake bread. The bakery opens early. Flour and yeast supplied.");
        let est = SemanticEstimator::default();
        let tax = Taxonomy::builtin();
        let close = est.estimate(&resume, &jd, "Senior Backend Engineer", &tax);
        let far = est.estimate(&resume, &unrelated, "Head Baker", &tax);
        assert!(close.score > far.score, "{} <= {}", close.score, far.score);
    }

    #[test]
    fn test_empty_inputs_fall_back_without_panic() {
        let empty = normalize("");
        let jd = normalize(JD);
        let analysis =
            SemanticEstimator::default().estimate(&empty, &jd, "Engineer", &Taxonomy::builtin());
        assert!(analysis.used_fallback);
        assert_eq!(analysis.backend, "overlap");
        assert!(analysis.score >= 0.0 && analysis.score <= 100.0);
    }

    #[test]
    fn test_all_subscores_bounded() {
        let resume = normalize(RESUME);
        let jd = normalize(JD);
        let a = SemanticEstimator::default().estimate(&resume, &jd, "x y z", &Taxonomy::builtin());
        for v in [
            a.job_title_match,
            a.industry_alignment,
            a.experience_alignment,
            a.responsibility_match,
            a.score,
        ] {
            assert!((0.0..=100.0).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn test_custom_backend_is_used() {
        struct Always(f64);
        impl SimilarityBackend for Always {
            fn name(&self) -> &'static str {
                "always"
            }
            fn similarity(&self, _: &[String], _: &[String]) -> Option<f64> {
                Some(self.0)
            }
        }
        let resume = normalize(RESUME);
        let jd = normalize(JD);
        let est = SemanticEstimator::new(Box::new(Always(0.5)));
        let analysis = est.estimate(&resume, &jd, "", &Taxonomy::builtin());
        assert_eq!(analysis.backend, "always");
        assert!(!analysis.used_fallback);
    }

    #[test]
    fn test_nan_similarity_sanitized() {
        assert_eq!(scale(f64::NAN), 0.0);
        assert_eq!(scale(-0.5), 0.0);
        assert_eq!(scale(1.5), 100.0);
    }
}
