use crate::dtos::{CreateMessageRequest, StatusResponse};
use crate::models::Message;
use crate::services::persistence::store_message;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

#[tracing::instrument(skip(state, request), fields(message_id = %request.message_id))]
pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let message = Message::new(
        request.message_id,
        request.session_id,
        request.sender_type,
        request.message_text,
    );

    store_message(
        state.datastore.as_ref(),
        &message,
        state.config.persistence.timeout,
    )
    .await?;

    tracing::info!(
        session_id = %message.session_id,
        sender_type = %message.sender_type,
        "Message stored"
    );

    Ok(Json(StatusResponse::new("message stored")))
}
