//! Score Aggregator — combines the four component scores with fixed weights,
//! derives a confidence score from input-quality signals, and emits the
//! tiered improvement suggestions.

use serde::{Deserialize, Serialize};

use crate::analysis::experience::ExperienceAnalysis;
use crate::analysis::format::FormatAnalysis;
use crate::analysis::keywords::KeywordBuckets;
use crate::analysis::semantic::SemanticAnalysis;

// ────────────────────────────────────────────────────────────────────────────
// Weights and thresholds
// ────────────────────────────────────────────────────────────────────────────

/// Keyword bucket weights. Soft skills stay out of the weighted average and
/// surface through suggestions instead, so a JD with no explicit soft-skill
/// asks never penalizes the candidate.
const W_REQUIRED: f64 = 0.50;
const W_PREFERRED: f64 = 0.30;
const W_INDUSTRY: f64 = 0.20;

/// Overall component weights.
const W_KEYWORD: f64 = 0.35;
const W_SEMANTIC: f64 = 0.25;
const W_FORMAT: f64 = 0.20;
const W_EXPERIENCE: f64 = 0.20;

/// Confidence deductions from the 100 baseline.
const DEDUCT_DEGENERATE_RESUME: f64 = 40.0;
const DEDUCT_DEGENERATE_JD: f64 = 40.0;
const DEDUCT_SHORT_RESUME: f64 = 15.0;
const DEDUCT_SHORT_JD: f64 = 15.0;
const DEDUCT_VACUOUS_BUCKET: f64 = 10.0;
const DEDUCT_FALLBACK: f64 = 15.0;

/// Suggestion thresholds.
const TITLE_MATCH_THRESHOLD: f64 = 50.0;
const KEYWORD_SCORE_THRESHOLD: f64 = 60.0;
const STRUCTURE_THRESHOLD: f64 = 80.0;
const COMPLETENESS_THRESHOLD: f64 = 75.0;
const DENSITY_THRESHOLD: f64 = 70.0;
const READABILITY_THRESHOLD: f64 = 70.0;

const MAX_LISTED_REQUIRED: usize = 5;
const MAX_LISTED_OPTIONAL: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Suggestions grouped by urgency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementPlan {
    pub critical: Vec<String>,
    pub important: Vec<String>,
    pub optional: Vec<String>,
}

/// The engine's sole externally visible artifact: value-like, serializable,
/// no identity beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    pub overall_score: f64,
    pub keyword_score: f64,
    pub semantic_score: f64,
    pub format_score: f64,
    pub experience_score: f64,
    pub keyword_analysis: KeywordBuckets,
    pub semantic_analysis: SemanticAnalysis,
    pub format_analysis: FormatAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub suggestions: Vec<String>,
    pub improvements: ImprovementPlan,
    pub confidence: f64,
}

/// Input-quality signals the engine derives before aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSignals {
    pub resume_degenerate: bool,
    pub jd_degenerate: bool,
    pub resume_short: bool,
    pub jd_short: bool,
    pub job_title_provided: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

pub fn aggregate(
    keywords: KeywordBuckets,
    semantic: SemanticAnalysis,
    format: FormatAnalysis,
    experience: ExperienceAnalysis,
    signals: InputSignals,
) -> AtsScoreResult {
    let keyword_score = W_REQUIRED * keywords.required.score
        + W_PREFERRED * keywords.preferred.score
        + W_INDUSTRY * keywords.industry.score;
    let semantic_score = semantic.score;
    let format_score = format.component_score();
    let experience_score = experience.component_score();

    let overall_score = (W_KEYWORD * keyword_score
        + W_SEMANTIC * semantic_score
        + W_FORMAT * format_score
        + W_EXPERIENCE * experience_score)
        .clamp(0.0, 100.0);

    let confidence = confidence(&keywords, &semantic, signals);
    let improvements = suggest(&keywords, &semantic, &format, keyword_score, signals);
    let suggestions = improvements
        .critical
        .iter()
        .chain(&improvements.important)
        .chain(&improvements.optional)
        .cloned()
        .collect();

    AtsScoreResult {
        overall_score: round1(overall_score),
        keyword_score: round1(keyword_score),
        semantic_score: round1(semantic_score),
        format_score: round1(format_score),
        experience_score: round1(experience_score),
        keyword_analysis: keywords,
        semantic_analysis: semantic,
        format_analysis: format,
        experience_analysis: experience,
        suggestions,
        improvements,
        confidence: round1(confidence),
    }
}

/// Fixed deduction per risk factor, floored at zero. Designed so that an
/// empty resume or job description always lands below 50.
fn confidence(keywords: &KeywordBuckets, semantic: &SemanticAnalysis, s: InputSignals) -> f64 {
    let mut value = 100.0;
    if s.resume_degenerate {
        value -= DEDUCT_DEGENERATE_RESUME;
    } else if s.resume_short {
        value -= DEDUCT_SHORT_RESUME;
    }
    if s.jd_degenerate {
        value -= DEDUCT_DEGENERATE_JD;
    } else if s.jd_short {
        value -= DEDUCT_SHORT_JD;
    }
    value -= DEDUCT_VACUOUS_BUCKET * keywords.vacuous_technical_buckets() as f64;
    if semantic.used_fallback {
        value -= DEDUCT_FALLBACK;
    }
    value.clamp(0.0, 100.0)
}

/// Rule-based, deterministic suggestion generation. Each rule fires at most
/// once, so no duplicate suggestions for the same issue.
fn suggest(
    keywords: &KeywordBuckets,
    semantic: &SemanticAnalysis,
    format: &FormatAnalysis,
    keyword_score: f64,
    signals: InputSignals,
) -> ImprovementPlan {
    let mut plan = ImprovementPlan::default();

    if !keywords.required.missing.is_empty() {
        let listed: Vec<&str> = keywords
            .required
            .missing
            .iter()
            .take(MAX_LISTED_REQUIRED)
            .map(String::as_str)
            .collect();
        plan.critical
            .push(format!("Add missing required skills: {}", listed.join(", ")));
    }
    if signals.job_title_provided && semantic.job_title_match < TITLE_MATCH_THRESHOLD {
        plan.critical
            .push("Update job titles to better match the target position".to_string());
    }

    if signals.resume_degenerate {
        plan.important
            .push("Resume text too short to analyze reliably; add detail about roles and achievements".to_string());
    }
    if keywords.vacuous_technical_buckets() == 3 {
        plan.important.push(
            "Job description could not be parsed for specific skill requirements".to_string(),
        );
    }
    if keyword_score < KEYWORD_SCORE_THRESHOLD {
        plan.important
            .push("Strengthen coverage of the job's core keywords across your experience bullets".to_string());
    }
    if format.structure_score < STRUCTURE_THRESHOLD {
        plan.important.push(
            "Add missing resume sections (Summary, Experience, Education, Skills, Contact)"
                .to_string(),
        );
    }
    if format.section_completeness_score < COMPLETENESS_THRESHOLD {
        plan.important.push(
            "Include concrete details: employment dates, degree, and contact information"
                .to_string(),
        );
    }

    if !keywords.preferred.missing.is_empty() {
        let listed: Vec<&str> = keywords
            .preferred
            .missing
            .iter()
            .take(MAX_LISTED_OPTIONAL)
            .map(String::as_str)
            .collect();
        plan.optional
            .push(format!("Consider adding preferred skills: {}", listed.join(", ")));
    }
    if !keywords.soft_skills.missing.is_empty() {
        let listed: Vec<&str> = keywords
            .soft_skills
            .missing
            .iter()
            .take(MAX_LISTED_OPTIONAL)
            .map(String::as_str)
            .collect();
        plan.optional
            .push(format!("Add soft skills: {}", listed.join(", ")));
    }
    if format.keyword_density_score < DENSITY_THRESHOLD {
        plan.optional
            .push("Adjust keyword density toward a natural balance of technical terms".to_string());
    }
    if format.readability_score < READABILITY_THRESHOLD {
        plan.optional
            .push("Improve readability by using shorter, more concise bullet points".to_string());
    }

    plan
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::experience::analyze_experience;
    use crate::analysis::format::analyze_format;
    use crate::analysis::keywords::match_keywords;
    use crate::analysis::semantic::SemanticEstimator;
    use crate::taxonomy::Taxonomy;
    use crate::text::normalize;

    fn run(resume: &str, jd: &str, title: &str) -> AtsScoreResult {
        let tax = Taxonomy::builtin();
        let r = normalize(resume);
        let j = normalize(jd);
        let keywords = match_keywords(&r, &j, &tax);
        let semantic = SemanticEstimator::default().estimate(&r, &j, title, &tax);
        let format = analyze_format(&r, &tax);
        let experience = analyze_experience(&r, &j);
        let signals = InputSignals {
            resume_degenerate: r.is_degenerate(),
            jd_degenerate: j.is_degenerate(),
            resume_short: resume.len() < 600,
            jd_short: jd.len() < 300,
            job_title_provided: !title.trim().is_empty(),
        };
        aggregate(keywords, semantic, format, experience, signals)
    }

    const RESUME: &str = "Jane Doe\njane@example.com | 555-123-4567\n\nSummary\nSenior backend engineer with 6 years of experience.\n\nExperience\nAcme 2019-2024. Led a platform team. Developed python services with postgresql, docker, and aws. Reduced latency by 40%.\n\nEducation\nBS Computer Science, State University, 2019.\n\nSkills\nPython, Docker, PostgreSQL, AWS, Kubernetes";

    const JD: &str = "Senior Backend Engineer\n\nWe need 5 years of experience. Required: python, postgresql, docker, aws. You will have led teams and developed services at scale. Nice to have: kubernetes, terraform.";

    #[test]
    fn test_overall_uses_fixed_component_weights() {
        let result = run(RESUME, JD, "Senior Backend Engineer");
        let expected = 0.35 * result.keyword_score
            + 0.25 * result.semantic_score
            + 0.20 * result.format_score
            + 0.20 * result.experience_score;
        assert!((result.overall_score - round1(expected)).abs() < 0.11);
    }

    #[test]
    fn test_keyword_component_excludes_soft_skills() {
        let result = run(RESUME, JD, "");
        let expected = 0.5 * result.keyword_analysis.required.score
            + 0.3 * result.keyword_analysis.preferred.score
            + 0.2 * result.keyword_analysis.industry.score;
        assert!((result.keyword_score - round1(expected)).abs() < 0.11);
    }

    #[test]
    fn test_missing_required_keyword_is_critical() {
        let result = run("Skills: python", "Required: python, terraform and rust", "");
        let critical = result.improvements.critical.join(" ");
        assert!(critical.contains("rust"), "critical was: {critical}");
        assert!(critical.contains("terraform"));
    }

    #[test]
    fn test_missing_preferred_is_optional() {
        let result = run(RESUME, JD, "");
        let optional = result.improvements.optional.join(" ");
        assert!(optional.contains("terraform"), "optional was: {optional}");
    }

    #[test]
    fn test_unparseable_jd_flagged_with_reduced_confidence() {
        let good = run(RESUME, JD, "");
        let vague = run(RESUME, "A wonderful opportunity to join a lovely office with free snacks and good vibes all around here.", "");
        assert!(vague.confidence < good.confidence);
        assert!(vague
            .improvements
            .important
            .iter()
            .any(|s| s.contains("could not be parsed")));
        assert_eq!(vague.keyword_analysis.required.score, 100.0);
    }

    #[test]
    fn test_degenerate_resume_noted_and_confidence_low() {
        let result = run("", JD, "");
        assert!(result.confidence < 50.0, "confidence {}", result.confidence);
        assert!(result
            .improvements
            .important
            .iter()
            .any(|s| s.contains("too short")));
    }

    #[test]
    fn test_suggestions_are_ordered_and_unique() {
        let result = run("python", "Required: rust and go. Nice to have: terraform. Teamwork matters.", "");
        let n_tiers = result.improvements.critical.len()
            + result.improvements.important.len()
            + result.improvements.optional.len();
        assert_eq!(result.suggestions.len(), n_tiers);
        let mut sorted = result.suggestions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), result.suggestions.len(), "duplicate suggestions");
        // critical block comes first
        assert_eq!(result.suggestions[0], result.improvements.critical[0]);
    }

    #[test]
    fn test_title_mismatch_only_fires_with_title() {
        let with_title = run("python developer resume text goes here", JD, "Chief Pastry Officer");
        assert!(with_title
            .improvements
            .critical
            .iter()
            .any(|s| s.contains("job titles")));
        let without_title = run("python developer resume text goes here", JD, "");
        assert!(!without_title
            .improvements
            .critical
            .iter()
            .any(|s| s.contains("job titles")));
    }

    #[test]
    fn test_confidence_floors_at_zero() {
        let result = run("", "", "");
        assert!(result.confidence >= 0.0);
        assert!(result.confidence < 50.0);
        assert!((0.0..=100.0).contains(&result.overall_score));
    }
}
