use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::validation::MAX_TOPIC_LENGTH;

/// A single word drawn from the fixed pool.
#[derive(Debug, Serialize, ToSchema)]
pub struct WordResponse {
    /// Term from the fixed pool.
    pub word: String,
}

/// Request for a standalone generated word.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GenerateWordRequest {
    /// Optional category steering the generated word.
    #[serde(default)]
    #[validate(length(max = MAX_TOPIC_LENGTH))]
    pub topic: Option<String>,
}

/// Generated word, or a fixed-pool substitute when `fallback` is set.
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedWordResponse {
    /// The selected word.
    pub word: String,
    /// Set when generation failed and the word came from the fixed pool.
    pub fallback: bool,
}
