use crate::dtos::{SubstitutionRequest, SubstitutionResponse};
use crate::services::upstream::{call_upstream, INGREDIENT_SERVICE};
use crate::services::GenerationParams;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

#[tracing::instrument(skip(state, request), fields(ingredient = %request.ingredient))]
pub async fn substitute(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubstitutionRequest>,
) -> Result<Json<SubstitutionResponse>, AppError> {
    let params = GenerationParams::from_config(&state.config, state.config.generation.max_substitutes);

    let result = call_upstream(
        INGREDIENT_SERVICE,
        state.config.upstream.timeout,
        state
            .ingredient_service
            .get_substitutes(&request.ingredient, &request.recipe, &params),
    )
    .await?;

    tracing::info!(
        source = %result.source,
        count = result.items.len(),
        "Substitutes returned"
    );

    Ok(Json(SubstitutionResponse::from(result)))
}
