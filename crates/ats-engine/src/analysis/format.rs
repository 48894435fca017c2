//! Format Analyzer — resume structure, readability, keyword density, and
//! section completeness. Operates on the resume alone; the job description
//! never enters here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;
use crate::text::NormalizedDocument;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\d{3})[\s.-]\d{3}[\s.-]?\d{4}")
        .expect("phone regex")
});
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(summary|objective|profile|about me)\b").expect("summary regex"));
static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(experience|employment|work history)\b").expect("experience regex")
});
static EDUCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(education|degree|university|college)\b").expect("education regex")
});
static SKILLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(skills|technologies|competencies)\b").expect("skills regex"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex"));
static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(bs|ba|ms|mba|phd|b\.s\.|b\.a\.|m\.s\.|ph\.d\.|bachelor|master|doctorate|associate)\b")
        .expect("degree regex")
});

/// Five canonical sections, each worth an equal share of the structure score.
const CANONICAL_SECTIONS: usize = 5;

/// Readability ideal ranges (words per sentence, characters per word).
const SENTENCE_LEN_IDEAL: (f64, f64) = (8.0, 24.0);
const WORD_LEN_IDEAL: (f64, f64) = (3.0, 7.0);
const SENTENCE_PENALTY_PER_WORD: f64 = 6.0;
const WORD_PENALTY_PER_CHAR: f64 = 15.0;

/// Keyword density band: recognized taxonomy terms per word. Below the band
/// is scarcity, above it is stuffing; inside scores 100.
const DENSITY_LOW: f64 = 0.015;
const DENSITY_HIGH: f64 = 0.07;
const STUFFING_PENALTY: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatAnalysis {
    pub structure_score: f64,
    pub readability_score: f64,
    pub keyword_density_score: f64,
    pub section_completeness_score: f64,
}

impl FormatAnalysis {
    /// Component weights: 0.3 structure, 0.3 readability, 0.2 density,
    /// 0.2 completeness.
    pub fn component_score(&self) -> f64 {
        0.3 * self.structure_score
            + 0.3 * self.readability_score
            + 0.2 * self.keyword_density_score
            + 0.2 * self.section_completeness_score
    }
}

pub fn analyze_format(resume: &NormalizedDocument, taxonomy: &Taxonomy) -> FormatAnalysis {
    let text = resume.raw_lower();

    let sections_present = [
        EMAIL_RE.is_match(text) || PHONE_RE.is_match(text), // contact
        SUMMARY_RE.is_match(text),
        EXPERIENCE_RE.is_match(text),
        EDUCATION_RE.is_match(text),
        SKILLS_RE.is_match(text),
    ]
    .iter()
    .filter(|&&p| p)
    .count();
    let structure_score = 100.0 * sections_present as f64 / CANONICAL_SECTIONS as f64;

    FormatAnalysis {
        structure_score: round1(structure_score),
        readability_score: round1(readability(resume)),
        keyword_density_score: round1(keyword_density(resume, taxonomy)),
        section_completeness_score: round1(completeness(text)),
    }
}

/// Penalizes extremes in both directions relative to the ideal ranges.
fn readability(resume: &NormalizedDocument) -> f64 {
    if resume.word_count() == 0 {
        return 0.0;
    }
    let avg_sentence = resume.word_count() as f64 / resume.sentence_count().max(1) as f64;
    let sentence_score = band_score(
        avg_sentence,
        SENTENCE_LEN_IDEAL,
        SENTENCE_PENALTY_PER_WORD,
    );

    let total_chars: usize = resume.tokens().iter().map(String::len).sum();
    let avg_word = total_chars as f64 / resume.word_count() as f64;
    let word_score = band_score(avg_word, WORD_LEN_IDEAL, WORD_PENALTY_PER_CHAR);

    0.5 * sentence_score + 0.5 * word_score
}

fn band_score(value: f64, (low, high): (f64, f64), penalty: f64) -> f64 {
    let distance = if value < low {
        low - value
    } else if value > high {
        value - high
    } else {
        return 100.0;
    };
    (100.0 - distance * penalty).max(0.0)
}

/// Unimodal density curve: distinct recognized terms / word count, peaking
/// over the target band.
fn keyword_density(resume: &NormalizedDocument, taxonomy: &Taxonomy) -> f64 {
    if resume.word_count() == 0 {
        return 0.0;
    }
    let recognized = taxonomy
        .technical_terms()
        .chain(taxonomy.industry_terms())
        .chain(taxonomy.soft_terms())
        .filter(|t| resume.contains_term(t))
        .count();
    let density = recognized as f64 / resume.word_count() as f64;
    if density < DENSITY_LOW {
        100.0 * density / DENSITY_LOW
    } else if density <= DENSITY_HIGH {
        100.0
    } else {
        (100.0 - (density - DENSITY_HIGH) * STUFFING_PENALTY).max(0.0)
    }
}

/// Fraction of expected sub-fields present: employment dates, a degree
/// mention, an e-mail address, a phone number.
fn completeness(text: &str) -> f64 {
    let signals = [
        YEAR_RE.is_match(text),
        DEGREE_RE.is_match(text),
        EMAIL_RE.is_match(text),
        PHONE_RE.is_match(text),
    ];
    25.0 * signals.iter().filter(|&&p| p).count() as f64
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
