use thiserror::Error;

/// Engine-level error type.
///
/// Only `InvalidInput` surfaces from [`crate::AtsEngine::score`]: every other
/// degraded condition (empty text, unavailable vector backend) is folded into
/// the returned result as lowered confidence plus explanatory suggestions.
#[derive(Debug, Error)]
pub enum AtsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Taxonomy configuration error: {0}")]
    TaxonomyConfig(#[from] serde_json::Error),
}
