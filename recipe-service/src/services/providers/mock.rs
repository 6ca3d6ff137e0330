//! Fixed-answer service implementations.
//!
//! Used by tests, and in production when an upstream URL is not configured
//! (answering with an empty result).

use super::{GenerationParams, IngredientService, ProviderError, RecipeService};
use crate::models::{RecipeSuggestion, SuggestionResult};
use async_trait::async_trait;
use std::time::Duration;

/// Ingredient service that always answers with the same result.
pub struct StaticIngredientService {
    result: SuggestionResult,
    enabled: bool,
    delay: Option<Duration>,
}

impl StaticIngredientService {
    pub fn new(result: SuggestionResult) -> Self {
        Self {
            result,
            enabled: true,
            delay: None,
        }
    }

    /// Answers `{items: [], source: "none"}`.
    pub fn empty() -> Self {
        Self::new(SuggestionResult::none())
    }

    /// Every call fails as if the backend were down.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::empty()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl IngredientService for StaticIngredientService {
    async fn get_substitutes(
        &self,
        _ingredient: &str,
        _recipe: &str,
        _params: &GenerationParams,
    ) -> Result<SuggestionResult, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Static ingredient service not enabled".to_string(),
            ));
        }

        Ok(self.result.clone())
    }
}

/// Recipe service that always answers with the same recipes.
pub struct StaticRecipeService {
    recipes: Vec<RecipeSuggestion>,
    enabled: bool,
    delay: Option<Duration>,
}

impl StaticRecipeService {
    pub fn new(recipes: Vec<RecipeSuggestion>) -> Self {
        Self {
            recipes,
            enabled: true,
            delay: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::empty()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl RecipeService for StaticRecipeService {
    async fn get_suggestions(
        &self,
        _ingredients: &[String],
        _params: &GenerationParams,
    ) -> Result<Vec<RecipeSuggestion>, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Static recipe service not enabled".to_string(),
            ));
        }

        Ok(self.recipes.clone())
    }
}
