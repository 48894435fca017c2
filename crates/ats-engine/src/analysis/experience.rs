//! Experience Analyzer — explicit years-of-experience extraction, seniority
//! inference from indicator verbs, and achievement/responsibility alignment.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::text::{NormalizedDocument, Sentence};

/// "5+ years", "3 years of experience", "10 yrs exp".
static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})\s*\+?\s*(?:years?|yrs?)(?:\s+of)?(?:\s+(?:experience|exp))?\b")
        .expect("years regex")
});

/// Quantified-achievement signals: percentages, currency figures, counts of
/// a thousand or more.
static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)?\s*(?:%|percent)|[$€£]\s*\d|\b\d{1,3},\d{3}\b|\b\d{4,}\b")
        .expect("metric regex")
});

const SENIOR_VERBS: &[&str] = &[
    "led", "architected", "mentored", "supervised", "spearheaded", "directed", "owned",
];
const MID_VERBS: &[&str] = &[
    "developed", "implemented", "built", "maintained", "designed", "deployed", "shipped",
];
const JUNIOR_VERBS: &[&str] = &["assisted", "supported", "learned", "interned", "shadowed"];

const SENIOR_TITLES: &[&str] = &["senior", "lead", "principal", "staff", "director", "manager"];
const JUNIOR_TITLES: &[&str] = &["junior", "intern", "graduate", "trainee"];

pub(crate) fn is_action_verb(token: &str) -> bool {
    SENIOR_VERBS.contains(&token) || MID_VERBS.contains(&token) || JUNIOR_VERBS.contains(&token)
}

/// Inferred experience level, ordered from junior to senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    Junior,
    Mid,
    Senior,
}

/// Experience signals extracted from both documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    /// Maximum explicit years-of-experience claim in the resume, if any.
    pub detected_years: Option<u32>,
    /// Years asked for by the job description, if stated.
    pub required_years: Option<u32>,
    pub resume_seniority: Option<SeniorityTier>,
    pub jd_seniority: Option<SeniorityTier>,
    pub relevant_experience_score: f64,
    pub project_match_score: f64,
    pub achievement_alignment_score: f64,
}

impl ExperienceAnalysis {
    /// Component weights: 0.4 relevance, 0.3 project match, 0.3 achievements.
    pub fn component_score(&self) -> f64 {
        0.4 * self.relevant_experience_score
            + 0.3 * self.project_match_score
            + 0.3 * self.achievement_alignment_score
    }
}

/// Maximum explicit years mention in the text, capped at a sane bound.
pub fn extract_years(doc: &NormalizedDocument) -> Option<u32> {
    YEARS_RE
        .captures_iter(doc.raw_lower())
        .filter_map(|c| c[1].parse::<u32>().ok())
        .filter(|&y| y <= 50)
        .max()
}

/// Dominant seniority tier by indicator-verb and title-keyword frequency.
/// Ties resolve toward the more senior tier.
pub fn infer_seniority(doc: &NormalizedDocument) -> Option<SeniorityTier> {
    let mut senior = 0usize;
    let mut mid = 0usize;
    let mut junior = 0usize;
    for token in doc.tokens() {
        let t = token.as_str();
        if SENIOR_VERBS.contains(&t) || SENIOR_TITLES.contains(&t) {
            senior += 1;
        } else if MID_VERBS.contains(&t) {
            mid += 1;
        } else if JUNIOR_VERBS.contains(&t) || JUNIOR_TITLES.contains(&t) {
            junior += 1;
        }
    }
    if senior == 0 && mid == 0 && junior == 0 {
        return None;
    }
    if senior >= mid && senior >= junior {
        Some(SeniorityTier::Senior)
    } else if mid >= junior {
        Some(SeniorityTier::Mid)
    } else {
        Some(SeniorityTier::Junior)
    }
}

/// Alignment between two inferred tiers, symmetric in both directions:
/// over-qualification is penalized the same as under-qualification.
pub fn tier_alignment_score(a: Option<SeniorityTier>, b: Option<SeniorityTier>) -> f64 {
    match (a, b) {
        (Some(x), Some(y)) => match (x as i8 - y as i8).abs() {
            0 => 100.0,
            1 => 60.0,
            _ => 25.0,
        },
        // No seniority signal on either side: nothing contradicts.
        (None, None) => 100.0,
        // Signal on one side only: weak evidence either way.
        _ => 50.0,
    }
}

/// Sentences that carry an action verb — the "responsibility themes" of a JD
/// and the project descriptions of a resume.
pub(crate) fn verb_sentences(doc: &NormalizedDocument) -> Vec<&Sentence> {
    doc.sentences()
        .iter()
        .filter(|s| s.tokens.iter().any(|t| is_action_verb(t)))
        .collect()
}

/// Resume sentences pairing an action verb with a quantified outcome.
fn achievement_sentences(doc: &NormalizedDocument) -> Vec<&Sentence> {
    verb_sentences(doc)
        .into_iter()
        .filter(|s| METRIC_RE.is_match(&s.raw))
        .collect()
}

pub fn analyze_experience(
    resume: &NormalizedDocument,
    jd: &NormalizedDocument,
) -> ExperienceAnalysis {
    let detected_years = extract_years(resume);
    let required_years = extract_years(jd);
    let resume_seniority = infer_seniority(resume);
    let jd_seniority = infer_seniority(jd);

    let tier_score = tier_alignment_score(resume_seniority, jd_seniority);
    let relevant_experience_score = match years_gap_score(detected_years, required_years) {
        Some(years_score) => 0.6 * tier_score + 0.4 * years_score,
        None => tier_score,
    };

    let themes = verb_sentences(jd);
    let theme_tokens = sentence_token_union(&themes);

    let project_tokens = sentence_token_union(&verb_sentences(resume));
    let achievement_tokens = sentence_token_union(&achievement_sentences(resume));

    ExperienceAnalysis {
        detected_years,
        required_years,
        resume_seniority,
        jd_seniority,
        relevant_experience_score: round1(relevant_experience_score),
        project_match_score: round1(overlap_score(&project_tokens, &theme_tokens)),
        achievement_alignment_score: round1(overlap_score(&achievement_tokens, &theme_tokens)),
    }
}

/// Years-gap score when the JD states a requirement. A resume with no
/// explicit claim scores a weak 40 rather than zero.
fn years_gap_score(resume: Option<u32>, jd: Option<u32>) -> Option<f64> {
    match (resume, jd) {
        (Some(r), Some(j)) => {
            let gap = (r as f64 - j as f64).abs();
            Some((100.0 - 12.5 * gap).max(0.0))
        }
        (None, Some(_)) => Some(40.0),
        (_, None) => None,
    }
}

/// Jaccard overlap scaled to [0,100]. An empty JD side is neutral (50): no
/// themes to align with is not the candidate's deficit.
fn overlap_score(resume_side: &BTreeSet<&str>, jd_side: &BTreeSet<&str>) -> f64 {
    if jd_side.is_empty() {
        return 50.0;
    }
    if resume_side.is_empty() {
        return 0.0;
    }
    let intersection = resume_side.intersection(jd_side).count() as f64;
    let union = resume_side.union(jd_side).count() as f64;
    (intersection / union * 100.0).clamp(0.0, 100.0)
}

fn sentence_token_union<'a>(sentences: &[&'a Sentence]) -> BTreeSet<&'a str> {
    sentences
        .iter()
        .flat_map(|s| s.tokens.iter().map(String::as_str))
        .collect()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
