//! Deterministic ATS (Applicant Tracking System) scoring engine.
//!
//! Given a candidate's resume text and a job description, the engine produces
//! a calibrated match score, a categorized keyword gap analysis, and
//! prioritized improvement suggestions. The computation is a pure function of
//! its text inputs plus an immutable, versioned keyword taxonomy: no network,
//! no persistence, no hidden randomness.
//!
//! Entry point: [`AtsEngine::score`]. The taxonomy is injected explicitly via
//! [`TaxonomyStore`] so tests can run against custom vocabularies and a
//! hosting service can hot-reload vocabulary with an atomic snapshot swap.

pub mod aggregate;
pub mod analysis;
pub mod engine;
pub mod error;
pub mod taxonomy;
pub mod text;

pub use aggregate::{AtsScoreResult, ImprovementPlan};
pub use analysis::experience::{ExperienceAnalysis, SeniorityTier};
pub use analysis::format::FormatAnalysis;
pub use analysis::keywords::{BucketResult, KeywordBuckets};
pub use analysis::semantic::{
    OverlapBackend, SemanticAnalysis, SemanticEstimator, SimilarityBackend, TfIdfBackend,
};
pub use engine::AtsEngine;
pub use error::AtsError;
pub use taxonomy::{Taxonomy, TaxonomyBuilder, TaxonomyConfig, TaxonomyStore, TechDomain};
pub use text::{normalize, NormalizedDocument};
