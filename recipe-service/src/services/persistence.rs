//! Datastore writes as seen from the handlers.
//!
//! `/messages` and `/feedback` need the row stored before they answer;
//! the `/suggest` message log is best-effort and may run in the background.

use crate::config::PersistenceMode;
use crate::models::{Feedback, Message};
use crate::services::datastore::{Datastore, StoreError, FEEDBACK_TABLE, MESSAGES_TABLE};
use crate::services::metrics::record_persistence_failure;
use service_core::error::AppError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

async fn bounded<F>(timeout: Duration, write: F) -> Result<(), StoreError>
where
    F: Future<Output = Result<(), StoreError>>,
{
    tokio::time::timeout(timeout, write)
        .await
        .map_err(|_| StoreError::Timeout(timeout))?
}

fn failure_reason(err: &StoreError) -> &'static str {
    match err {
        StoreError::Connection(_) => "connection",
        StoreError::Rejected { .. } => "rejected",
        StoreError::Timeout(_) => "timeout",
        StoreError::Unavailable(_) => "unavailable",
    }
}

fn to_app_error(table: &'static str, err: StoreError) -> AppError {
    record_persistence_failure(table, failure_reason(&err));
    tracing::error!(table = table, error = %err, "Datastore write failed");
    AppError::DatabaseError(anyhow::Error::new(err))
}

/// Insert a message row; any failure becomes a persistence error.
pub async fn store_message(
    datastore: &dyn Datastore,
    message: &Message,
    timeout: Duration,
) -> Result<(), AppError> {
    bounded(timeout, datastore.insert_message(message))
        .await
        .map_err(|e| to_app_error(MESSAGES_TABLE, e))
}

/// Insert a feedback row; any failure becomes a persistence error.
pub async fn store_feedback(
    datastore: &dyn Datastore,
    feedback: &Feedback,
    timeout: Duration,
) -> Result<(), AppError> {
    bounded(timeout, datastore.insert_feedback(feedback))
        .await
        .map_err(|e| to_app_error(FEEDBACK_TABLE, e))
}

async fn try_log(datastore: Arc<dyn Datastore>, message: Message, timeout: Duration) {
    match bounded(timeout, datastore.insert_message(&message)).await {
        Ok(()) => {
            tracing::debug!(message_id = %message.message_id, "User message logged");
        }
        Err(e) => {
            record_persistence_failure(MESSAGES_TABLE, failure_reason(&e));
            tracing::warn!(
                message_id = %message.message_id,
                session_id = %message.session_id,
                error = %e,
                "Failed to log user message, continuing"
            );
        }
    }
}

/// Log a message without ever failing the caller.
///
/// In [`PersistenceMode::Background`] the insert is spawned and this returns
/// immediately.
pub async fn log_message_best_effort(
    datastore: Arc<dyn Datastore>,
    message: Message,
    mode: PersistenceMode,
    timeout: Duration,
) {
    match mode {
        PersistenceMode::Awaited => try_log(datastore, message, timeout).await,
        PersistenceMode::Background => {
            tokio::spawn(try_log(datastore, message, timeout));
        }
    }
}
