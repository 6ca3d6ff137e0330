use crate::models::SenderType;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    pub message_id: String,
    pub session_id: String,
    /// Only `user` or `bot`; anything else fails deserialization.
    pub sender_type: SenderType,
    pub message_text: String,
}

/// Unknown fields (the web client also sends `session_id`) are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub message_id: String,
    pub is_helpful: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_ignores_unknown_fields() {
        let request: FeedbackRequest = serde_json::from_value(serde_json::json!({
            "message_id": "m-1",
            "session_id": "s-1",
            "is_helpful": true
        }))
        .unwrap();

        assert_eq!(request.message_id, "m-1");
        assert!(request.comment.is_none());
    }

    #[test]
    fn test_message_rejects_unknown_sender() {
        let result = serde_json::from_value::<CreateMessageRequest>(serde_json::json!({
            "message_id": "m-1",
            "session_id": "s-1",
            "sender_type": "system",
            "message_text": "hello"
        }));

        assert!(result.is_err());
    }
}
