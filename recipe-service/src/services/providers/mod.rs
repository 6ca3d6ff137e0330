//! Ingredient and recipe service abstractions.
//!
//! Both services are external collaborators: this crate only forwards the
//! request with the configured generation parameters and hands back what
//! they return.

pub mod mock;
pub mod remote;

use crate::config::RecipeConfig;
use crate::models::{RecipeSuggestion, SuggestionResult};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use mock::{StaticIngredientService, StaticRecipeService};
pub use remote::{RemoteIngredientService, RemoteRecipeService};

/// Error type for upstream service calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Generation parameters forwarded with every upstream request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub model: String,
    pub max_results: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

impl GenerationParams {
    pub fn from_config(config: &RecipeConfig, max_results: usize) -> Self {
        Self {
            model: config.models.openai_model.clone(),
            max_results,
            temperature: config.generation.temperature,
            top_p: config.generation.top_p,
            repetition_penalty: config.generation.repetition_penalty,
        }
    }
}

/// Finds substitutes for an ingredient in the context of a recipe.
#[async_trait]
pub trait IngredientService: Send + Sync {
    async fn get_substitutes(
        &self,
        ingredient: &str,
        recipe: &str,
        params: &GenerationParams,
    ) -> Result<SuggestionResult, ProviderError>;
}

/// Suggests recipes that can be made from a list of ingredients.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn get_suggestions(
        &self,
        ingredients: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<RecipeSuggestion>, ProviderError>;
}
