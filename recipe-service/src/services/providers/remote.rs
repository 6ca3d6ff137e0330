//! HTTP adapters for ingredient and recipe services deployed elsewhere.

use super::{GenerationParams, IngredientService, ProviderError, RecipeService};
use crate::models::{RecipeSuggestion, SuggestionResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Duration;

fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("Failed to build HTTP client: {}", e)))
}

fn map_send_error(service: &str, e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(format!("{} did not answer in time", service))
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(
    service: &str,
    response: Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        let error_text = response.text().await.unwrap_or_default();
        return Err(ProviderError::ApiError(format!(
            "{} error {}: {}",
            service, status, error_text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::ApiError(format!("Failed to parse {} response: {}", service, e)))
}

#[derive(Serialize)]
struct SubstituteRequest<'a> {
    ingredient: &'a str,
    recipe: &'a str,
    #[serde(flatten)]
    params: &'a GenerationParams,
}

/// Calls `POST {base_url}/substitutes`.
pub struct RemoteIngredientService {
    base_url: String,
    client: Client,
}

impl RemoteIngredientService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/substitutes", self.base_url)
    }
}

#[async_trait]
impl IngredientService for RemoteIngredientService {
    async fn get_substitutes(
        &self,
        ingredient: &str,
        recipe: &str,
        params: &GenerationParams,
    ) -> Result<SuggestionResult, ProviderError> {
        tracing::debug!(
            ingredient = %ingredient,
            max_results = params.max_results,
            "Requesting substitutes"
        );

        let response = self
            .client
            .traced_post(&self.endpoint())
            .json(&SubstituteRequest {
                ingredient,
                recipe,
                params,
            })
            .send()
            .await
            .map_err(|e| map_send_error("ingredient service", e))?;

        read_json("ingredient service", response).await
    }
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    ingredients: &'a [String],
    #[serde(flatten)]
    params: &'a GenerationParams,
}

#[derive(Deserialize)]
struct SuggestResponse {
    recipes: Vec<RecipeSuggestion>,
}

/// Calls `POST {base_url}/suggestions`.
pub struct RemoteRecipeService {
    base_url: String,
    client: Client,
}

impl RemoteRecipeService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/suggestions", self.base_url)
    }
}

#[async_trait]
impl RecipeService for RemoteRecipeService {
    async fn get_suggestions(
        &self,
        ingredients: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<RecipeSuggestion>, ProviderError> {
        tracing::debug!(
            ingredient_count = ingredients.len(),
            max_results = params.max_results,
            "Requesting recipe suggestions"
        );

        let response = self
            .client
            .traced_post(&self.endpoint())
            .json(&SuggestRequest {
                ingredients,
                params,
            })
            .send()
            .await
            .map_err(|e| map_send_error("recipe service", e))?;

        let body: SuggestResponse = read_json("recipe service", response).await?;
        Ok(body.recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams {
            model: "gpt-4o-mini".to_string(),
            max_results: 5,
            temperature: 0.3,
            top_p: 0.9,
            repetition_penalty: 1.1,
        }
    }

    #[test]
    fn test_endpoints() {
        let ingredients =
            RemoteIngredientService::new("http://ingredients:9000", Duration::from_secs(1))
                .unwrap();
        assert_eq!(ingredients.endpoint(), "http://ingredients:9000/substitutes");

        let recipes =
            RemoteRecipeService::new("http://recipes:9000", Duration::from_secs(1)).unwrap();
        assert_eq!(recipes.endpoint(), "http://recipes:9000/suggestions");
    }

    #[test]
    fn test_substitute_request_flattens_params() {
        let params = params();
        let body = serde_json::to_value(SubstituteRequest {
            ingredient: "butter",
            recipe: "pancakes",
            params: &params,
        })
        .unwrap();

        assert_eq!(body["ingredient"], "butter");
        assert_eq!(body["recipe"], "pancakes");
        assert_eq!(body["max_results"], 5);
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let service = RemoteRecipeService::new("http://127.0.0.1:9", Duration::from_secs(2))
            .unwrap();
        let err = service
            .get_suggestions(&["egg".to_string()], &params())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::NetworkError(_) | ProviderError::Timeout(_)
        ));
    }
}
