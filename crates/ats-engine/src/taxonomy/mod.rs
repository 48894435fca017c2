//! Taxonomy Store — immutable, process-wide tables of recognized skill and
//! industry terms plus a synonym/alias map.
//!
//! Built once (from the built-in tables or a JSON `TaxonomyConfig`) and never
//! mutated afterwards. Hot reload goes through [`TaxonomyStore::swap`], an
//! atomic snapshot replacement: in-flight scoring keeps the `Arc` it took and
//! observes a consistent version for the whole call.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::error::AtsError;

/// Technical-skill domains, matching the built-in table groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechDomain {
    Languages,
    Frameworks,
    Web3,
    Databases,
    Cloud,
    DevOps,
    Data,
}

/// Canonical classification of a recognized term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermClass {
    Technical(TechDomain),
    Soft,
    Industry(String),
}

/// Immutable term tables. All stored terms are lowercase and deduplicated;
/// synonyms resolve to a canonical form before any lookup.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    technical: BTreeMap<TechDomain, BTreeSet<String>>,
    soft: BTreeSet<String>,
    industries: BTreeMap<String, BTreeSet<String>>,
    /// alias -> canonical
    synonyms: BTreeMap<String, String>,
    /// canonical -> aliases
    aliases: BTreeMap<String, BTreeSet<String>>,
}

impl Taxonomy {
    /// The built-in professional vocabulary (seven technical domains, soft
    /// skills, six industry vocabularies, common aliases).
    pub fn builtin() -> Self {
        builtin::build()
    }

    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    pub fn from_config(config: TaxonomyConfig) -> Self {
        let mut builder = TaxonomyBuilder::default();
        for (domain, terms) in config.technical {
            builder = builder.technical(domain, terms.iter().map(String::as_str));
        }
        builder = builder.soft(config.soft_skills.iter().map(String::as_str));
        for (industry, terms) in config.industries {
            builder = builder.industry(&industry, terms.iter().map(String::as_str));
        }
        for (alias, canonical) in config.synonyms {
            builder = builder.synonym(&alias, &canonical);
        }
        builder.build()
    }

    /// Loads a taxonomy from its JSON configuration form.
    pub fn from_json(json: &str) -> Result<Self, AtsError> {
        let config: TaxonomyConfig = serde_json::from_str(json)?;
        Ok(Self::from_config(config))
    }

    /// Resolves an alias to its canonical form; unknown terms pass through.
    pub fn canonical<'a>(&'a self, term: &'a str) -> &'a str {
        self.synonyms.get(term).map(String::as_str).unwrap_or(term)
    }

    /// All alias forms registered for a canonical term.
    pub fn aliases_of(&self, canonical: &str) -> impl Iterator<Item = &str> {
        self.aliases
            .get(canonical)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Classifies a term after synonym resolution. Precedence when tables
    /// overlap: technical, then industry, then soft.
    pub fn classify(&self, term: &str) -> Option<TermClass> {
        let canonical = self.canonical(term);
        for (domain, terms) in &self.technical {
            if terms.contains(canonical) {
                return Some(TermClass::Technical(*domain));
            }
        }
        for (industry, terms) in &self.industries {
            if terms.contains(canonical) {
                return Some(TermClass::Industry(industry.clone()));
            }
        }
        if self.soft.contains(canonical) {
            return Some(TermClass::Soft);
        }
        None
    }

    pub fn is_known(&self, term: &str) -> bool {
        self.classify(term).is_some()
    }

    /// Canonical technical terms across all domains, in deterministic order.
    pub fn technical_terms(&self) -> impl Iterator<Item = &str> {
        self.technical
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn soft_terms(&self) -> impl Iterator<Item = &str> {
        self.soft.iter().map(String::as_str)
    }

    /// Industry terms across all vocabularies, deduplicated.
    pub fn industry_terms(&self) -> impl Iterator<Item = &str> {
        self.industries
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn term_count(&self) -> usize {
        self.technical.values().map(BTreeSet::len).sum::<usize>()
            + self.soft.len()
            + self.industries.values().map(BTreeSet::len).sum::<usize>()
    }
}

/// Serde mirror of a taxonomy, for loading custom vocabularies from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub technical: BTreeMap<TechDomain, Vec<String>>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub industries: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
}

/// Builder for custom taxonomies. Lowercases and deduplicates on insert so
/// the invariants hold by construction.
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    technical: BTreeMap<TechDomain, BTreeSet<String>>,
    soft: BTreeSet<String>,
    industries: BTreeMap<String, BTreeSet<String>>,
    synonyms: BTreeMap<String, String>,
}

impl TaxonomyBuilder {
    pub fn technical<'a>(
        mut self,
        domain: TechDomain,
        terms: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.technical
            .entry(domain)
            .or_default()
            .extend(terms.into_iter().map(|t| t.trim().to_lowercase()));
        self
    }

    pub fn soft<'a>(mut self, terms: impl IntoIterator<Item = &'a str>) -> Self {
        self.soft
            .extend(terms.into_iter().map(|t| t.trim().to_lowercase()));
        self
    }

    pub fn industry<'a>(
        mut self,
        industry: &str,
        terms: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.industries
            .entry(industry.trim().to_lowercase())
            .or_default()
            .extend(terms.into_iter().map(|t| t.trim().to_lowercase()));
        self
    }

    pub fn synonym(mut self, alias: &str, canonical: &str) -> Self {
        self.synonyms
            .insert(alias.trim().to_lowercase(), canonical.trim().to_lowercase());
        self
    }

    pub fn build(self) -> Taxonomy {
        let mut aliases: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (alias, canonical) in &self.synonyms {
            aliases
                .entry(canonical.clone())
                .or_default()
                .insert(alias.clone());
        }
        let taxonomy = Taxonomy {
            technical: self.technical,
            soft: self.soft,
            industries: self.industries,
            synonyms: self.synonyms,
            aliases,
        };
        info!(terms = taxonomy.term_count(), "taxonomy built");
        taxonomy
    }
}

/// Process-wide taxonomy handle supporting atomic hot reload.
///
/// Readers call [`snapshot`](Self::snapshot) once per scoring call and keep
/// the returned `Arc` for the duration; [`swap`](Self::swap) replaces the
/// snapshot without disturbing in-flight computations.
#[derive(Debug)]
pub struct TaxonomyStore {
    inner: RwLock<Arc<Taxonomy>>,
}

impl TaxonomyStore {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            inner: RwLock::new(Arc::new(taxonomy)),
        }
    }

    pub fn snapshot(&self) -> Arc<Taxonomy> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock only means a writer panicked mid-swap; the
            // stored Arc is still a complete snapshot.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn swap(&self, taxonomy: Taxonomy) {
        let next = Arc::new(taxonomy);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
