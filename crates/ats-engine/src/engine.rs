//! Engine — wires the pipeline together behind the single `score` entry
//! point.
//!
//! `score` is synchronous and CPU-bound; the hosting service may call it
//! concurrently from any number of workers because the only shared resource
//! is the read-only taxonomy snapshot taken at the start of each call.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{aggregate, AtsScoreResult, InputSignals};
use crate::analysis::experience::analyze_experience;
use crate::analysis::format::analyze_format;
use crate::analysis::keywords::match_keywords;
use crate::analysis::semantic::{SemanticEstimator, SimilarityBackend};
use crate::error::AtsError;
use crate::taxonomy::{Taxonomy, TaxonomyStore};
use crate::text::normalize;

/// Hard upper bound on accepted input size. Anything larger is rejected as
/// `InvalidInput` rather than scored.
pub const MAX_INPUT_BYTES: usize = 1 << 20;

/// Below these raw lengths an input is "short" for confidence purposes (the
/// zero-ish case is caught separately by token count).
const SHORT_RESUME_BYTES: usize = 600;
const SHORT_JD_BYTES: usize = 300;

/// The ATS scoring engine. Cheap to construct; holds the taxonomy store and
/// the semantic-similarity strategy.
pub struct AtsEngine {
    store: Arc<TaxonomyStore>,
    estimator: SemanticEstimator,
}

impl AtsEngine {
    pub fn new(store: Arc<TaxonomyStore>) -> Self {
        Self {
            store,
            estimator: SemanticEstimator::default(),
        }
    }

    /// Engine over the built-in taxonomy.
    pub fn builtin() -> Self {
        Self::new(Arc::new(TaxonomyStore::new(Taxonomy::builtin())))
    }

    /// Swaps the primary semantic-similarity backend. Aggregation and
    /// suggestion logic are untouched by the choice of backend.
    pub fn with_backend(mut self, backend: Box<dyn SimilarityBackend>) -> Self {
        self.estimator = SemanticEstimator::new(backend);
        self
    }

    pub fn taxonomy_store(&self) -> &Arc<TaxonomyStore> {
        &self.store
    }

    /// Scores a resume against a job description.
    ///
    /// Empty or near-empty inputs are not errors: they produce a valid
    /// low-confidence result with explanatory suggestions. The only hard
    /// failure is `InvalidInput` (oversized input or embedded NUL bytes).
    pub fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        job_title: &str,
    ) -> Result<AtsScoreResult, AtsError> {
        validate_input("resume_text", resume_text)?;
        validate_input("job_description", job_description)?;
        validate_input("job_title", job_title)?;

        let taxonomy = self.store.snapshot();

        let resume = normalize(resume_text);
        let jd = normalize(job_description);
        debug!(
            resume_tokens = resume.word_count(),
            jd_tokens = jd.word_count(),
            "normalized inputs"
        );

        let keywords = match_keywords(&resume, &jd, &taxonomy);
        let semantic = self.estimator.estimate(&resume, &jd, job_title, &taxonomy);
        let format = analyze_format(&resume, &taxonomy);
        let experience = analyze_experience(&resume, &jd);

        let signals = InputSignals {
            resume_degenerate: resume.is_degenerate(),
            jd_degenerate: jd.is_degenerate(),
            resume_short: resume_text.len() < SHORT_RESUME_BYTES,
            jd_short: job_description.len() < SHORT_JD_BYTES,
            job_title_provided: !job_title.trim().is_empty(),
        };

        let result = aggregate(keywords, semantic, format, experience, signals);
        debug!(
            overall = result.overall_score,
            confidence = result.confidence,
            "scored"
        );
        Ok(result)
    }
}

fn validate_input(field: &str, value: &str) -> Result<(), AtsError> {
    if value.len() > MAX_INPUT_BYTES {
        return Err(AtsError::InvalidInput(format!(
            "{field} exceeds {MAX_INPUT_BYTES} bytes"
        )));
    }
    if value.contains('\0') {
        return Err(AtsError::InvalidInput(format!(
            "{field} contains NUL bytes"
        )));
    }
    Ok(())
}
