//! Text Normalizer — turns raw resume/JD text into a `NormalizedDocument`.
//!
//! Pure and infallible: empty input yields a zero-token document, never an
//! error. Tokenization preserves punctuation that is load-bearing in
//! technical terms ("node.js", "c++", "c#", "ci/cd") while stripping
//! everything else.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Tokens: lowercase alphanumeric runs, keeping `.` `+` `#` `/` `-` `%` when
/// internal to a term and `+` `#` `%` when trailing ("c++", "c#", "40%").
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9][a-z0-9+#%./-]*[a-z0-9+#%]|[a-z0-9]").expect("token regex"));

/// Sentence boundaries: terminal punctuation followed by whitespace/EOL, or a
/// newline. A bare `.` inside "node.js" never splits because it is not
/// followed by whitespace.
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)|\n+").expect("sentence regex"));

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[-*•·]|\d+[.)])\s+").expect("bullet regex"));

/// Tokens below this count mark a document as degenerate for confidence
/// purposes.
const DEGENERATE_TOKEN_COUNT: usize = 20;

/// How many leading non-empty lines count as "title-like" for job-title
/// matching, and the token cap applied to them.
const TITLE_LINES: usize = 2;
const TITLE_TOKEN_CAP: usize = 12;

/// Longest phrase (in tokens) indexed for multi-word taxonomy terms such as
/// "machine learning" or "binance smart chain".
const MAX_PHRASE_LEN: usize = 3;

/// Filler words excluded from tf-idf weighting and "meaningful token" counts.
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for", "from", "has", "have",
    "in", "into", "is", "it", "its", "of", "on", "or", "our", "that", "the", "their", "them",
    "they", "this", "to", "was", "we", "were", "will", "with", "you", "your",
];

pub(crate) fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// A sentence with both its raw slice (for pattern searches like metric
/// detection) and its normalized tokens.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub raw: String,
    pub tokens: Vec<String>,
}

/// Normalized view of one input document. Created per scoring call and
/// discarded afterwards; never shared across calls.
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    raw: String,
    raw_lower: String,
    tokens: Vec<String>,
    sentences: Vec<Sentence>,
    title_tokens: Vec<String>,
    bullet_line_count: usize,
    phrases: BTreeSet<String>,
}

/// Normalizes raw text. Case-folds, tokenizes, splits sentences, detects
/// bullet lines, and indexes 1–3 token phrases for term containment checks.
pub fn normalize(text: &str) -> NormalizedDocument {
    let raw_lower = text.to_lowercase();
    let tokens: Vec<String> = TOKEN_RE
        .find_iter(&raw_lower)
        .map(|m| m.as_str().to_string())
        .collect();

    let sentences: Vec<Sentence> = SENTENCE_SPLIT_RE
        .split(text)
        .filter_map(|piece| {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                return None;
            }
            let lower = trimmed.to_lowercase();
            let toks: Vec<String> = TOKEN_RE
                .find_iter(&lower)
                .map(|m| m.as_str().to_string())
                .collect();
            if toks.is_empty() {
                None
            } else {
                Some(Sentence {
                    raw: trimmed.to_string(),
                    tokens: toks,
                })
            }
        })
        .collect();

    let bullet_line_count = text
        .lines()
        .filter(|line| BULLET_RE.is_match(line.trim_start()))
        .count();

    let title_tokens: Vec<String> = raw_lower
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(TITLE_LINES)
        .flat_map(|l| TOKEN_RE.find_iter(l).map(|m| m.as_str().to_string()).collect::<Vec<_>>())
        .take(TITLE_TOKEN_CAP)
        .collect();

    let mut phrases = BTreeSet::new();
    for len in 1..=MAX_PHRASE_LEN {
        for window in tokens.windows(len) {
            phrases.insert(window.join(" "));
        }
    }

    NormalizedDocument {
        raw: text.to_string(),
        raw_lower,
        tokens,
        sentences,
        title_tokens,
        bullet_line_count,
        phrases,
    }
}

impl NormalizedDocument {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn raw_lower(&self) -> &str {
        &self.raw_lower
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Tokens from the first non-empty lines — the "title-like" region used
    /// for job-title matching.
    pub fn title_tokens(&self) -> &[String] {
        &self.title_tokens
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn bullet_line_count(&self) -> usize {
        self.bullet_line_count
    }

    /// Non-empty line count of the raw text.
    pub fn line_count(&self) -> usize {
        self.raw.lines().filter(|l| !l.trim().is_empty()).count()
    }

    /// True when a normalized form of `term` (already lowercase) appears in
    /// the document as a whole token or phrase.
    pub fn contains_term(&self, term: &str) -> bool {
        self.phrases.contains(term)
    }

    /// Token index of the first occurrence of `term`, scanning phrase windows
    /// left to right. Used by the required/preferred partition heuristic.
    pub fn first_occurrence(&self, term: &str) -> Option<usize> {
        let term_tokens: Vec<&str> = term.split_whitespace().collect();
        if term_tokens.is_empty() || term_tokens.len() > MAX_PHRASE_LEN {
            return None;
        }
        self.tokens
            .windows(term_tokens.len())
            .position(|w| w.iter().map(String::as_str).eq(term_tokens.iter().copied()))
    }

    pub fn token_set(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    /// Too little text to analyze reliably. Not an error; scoring proceeds
    /// and confidence absorbs the risk.
    pub fn is_degenerate(&self) -> bool {
        self.tokens.len() < DEGENERATE_TOKEN_COUNT
    }
}
