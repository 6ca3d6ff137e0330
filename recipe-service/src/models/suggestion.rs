use serde::{Deserialize, Serialize};

/// Substitute ingredients produced by the ingredient service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub items: Vec<String>,
    /// Where the items came from: `dataset`, `gpt`, `gpt_context`,
    /// `dataset+gpt` or `none`.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Vec<String>>,
}

impl SuggestionResult {
    pub fn new(items: Vec<String>, source: impl Into<String>) -> Self {
        Self {
            items,
            source: source.into(),
            reasoning: None,
        }
    }

    /// Empty answer, as returned when no backend is available.
    pub fn none() -> Self {
        Self::new(Vec::new(), "none")
    }
}

/// A recipe produced by the recipe service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub name: String,
    pub ingredients: Vec<String>,
}
