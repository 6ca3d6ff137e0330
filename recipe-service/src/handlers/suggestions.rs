use crate::dtos::{RecipeView, SuggestionRequest, SuggestionResponse};
use crate::models::Message;
use crate::services::persistence::log_message_best_effort;
use crate::services::upstream::{call_upstream, RECIPE_SERVICE};
use crate::services::GenerationParams;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;
use uuid::Uuid;

/// Logs the user's message when the request carries one, then asks the
/// recipe service. A failed log never fails the request.
#[tracing::instrument(skip(state, request), fields(ingredient_count = request.ingredients.len()))]
pub async fn suggest(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    if let (Some(session_id), Some(user_message)) = (request.session_id, request.user_message) {
        let message_id = request
            .message_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        log_message_best_effort(
            state.datastore.clone(),
            Message::from_user(message_id, session_id, user_message),
            state.config.persistence.mode,
            state.config.persistence.timeout,
        )
        .await;
    }

    let params = GenerationParams::from_config(&state.config, state.config.generation.max_recipes);

    let recipes = call_upstream(
        RECIPE_SERVICE,
        state.config.upstream.timeout,
        state
            .recipe_service
            .get_suggestions(&request.ingredients, &params),
    )
    .await?;

    tracing::info!(count = recipes.len(), "Recipes suggested");

    Ok(Json(SuggestionResponse {
        recipes: recipes.into_iter().map(RecipeView::from).collect(),
    }))
}
