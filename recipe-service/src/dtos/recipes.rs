use crate::config::MAX_INGREDIENTS;
use crate::models::{RecipeSuggestion, SuggestionResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

fn rule(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::from(message));
    err
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("blank", "must not be blank".to_string()));
    }
    Ok(())
}

/// At most `MAX_INGREDIENTS` entries, none blank. An empty list is allowed.
fn validate_ingredients(ingredients: &[String]) -> Result<(), ValidationError> {
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(rule(
            "max_ingredients",
            format!(
                "at most {} ingredients allowed, got {}",
                MAX_INGREDIENTS,
                ingredients.len()
            ),
        ));
    }
    if ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err(rule(
            "blank_ingredient",
            "ingredients must not contain blank entries".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubstitutionRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub ingredient: String,
    pub recipe: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionResponse {
    pub substitutes: Vec<String>,
    pub source: String,
}

impl From<SuggestionResult> for SubstitutionResponse {
    fn from(result: SuggestionResult) -> Self {
        Self {
            substitutes: result.items,
            source: result.source,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SuggestionRequest {
    pub session_id: Option<String>,
    pub message_id: Option<String>,
    pub user_message: Option<String>,
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipeView {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl From<RecipeSuggestion> for RecipeView {
    fn from(recipe: RecipeSuggestion) -> Self {
        Self {
            name: recipe.name,
            ingredients: recipe.ingredients,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SuggestionResponse {
    pub recipes: Vec<RecipeView>,
}
