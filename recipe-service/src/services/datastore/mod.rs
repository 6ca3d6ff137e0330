//! Datastore abstraction for chat message and feedback persistence.
//!
//! Production uses the hosted Supabase project through its REST interface;
//! tests swap in [`MockDatastore`].

pub mod mock;
pub mod supabase;

use crate::models::{Feedback, Message};
use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockDatastore;
pub use supabase::SupabaseStore;

pub const MESSAGES_TABLE: &str = "messages";
pub const FEEDBACK_TABLE: &str = "feedback";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Datastore rejected write to '{table}' ({status}): {body}")]
    Rejected {
        table: &'static str,
        status: u16,
        body: String,
    },

    #[error("Datastore timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Datastore unavailable: {0}")]
    Unavailable(String),
}

/// Append-only row storage.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn insert_message(&self, message: &Message) -> Result<(), StoreError>;
    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError>;
    async fn health_check(&self) -> Result<(), StoreError>;
}
