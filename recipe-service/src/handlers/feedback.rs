use crate::dtos::{FeedbackRequest, StatusResponse};
use crate::models::Feedback;
use crate::services::persistence::store_feedback;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// Append-only: repeated submissions for one message store repeated rows.
#[tracing::instrument(skip(state, request), fields(message_id = %request.message_id))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<FeedbackRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let feedback = Feedback::new(request.message_id, request.is_helpful, request.comment);

    store_feedback(
        state.datastore.as_ref(),
        &feedback,
        state.config.persistence.timeout,
    )
    .await?;

    tracing::info!(is_helpful = feedback.is_helpful, "Feedback stored");

    Ok(Json(StatusResponse::new("feedback stored")))
}
