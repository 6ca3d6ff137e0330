//! Chat message rows stored in the `messages` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Bot,
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderType::User => write!(f, "user"),
            SenderType::Bot => write!(f, "bot"),
        }
    }
}

/// A logged chat message. Append-only: never updated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Caller-supplied identifier; uniqueness is not enforced.
    pub message_id: String,
    pub session_id: String,
    pub sender_type: SenderType,
    pub message_text: String,
    /// Stamped by the server when the row is built.
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        message_id: String,
        session_id: String,
        sender_type: SenderType,
        message_text: String,
    ) -> Self {
        Self {
            message_id,
            session_id,
            sender_type,
            message_text,
            created_at: Utc::now(),
        }
    }

    pub fn from_user(message_id: String, session_id: String, message_text: String) -> Self {
        Self::new(message_id, session_id, SenderType::User, message_text)
    }
}
