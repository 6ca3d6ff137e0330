//! Feedback rows stored in the `feedback` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A thumbs-up/down on a bot message, with an optional comment.
///
/// `message_id` refers to a prior message but is never checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message_id: String,
    pub is_helpful: bool,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Feedback {
    /// Blank comments are stored as null.
    pub fn new(message_id: String, is_helpful: bool, comment: Option<String>) -> Self {
        Self {
            message_id,
            is_helpful,
            comment: comment.filter(|c| !c.trim().is_empty()),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment_is_null() {
        let feedback = Feedback::new("m-1".into(), true, Some("  ".into()));
        let row = serde_json::to_value(&feedback).unwrap();

        assert!(row["comment"].is_null());
        assert_eq!(row["is_helpful"], true);
    }

    #[test]
    fn test_comment_kept() {
        let feedback = Feedback::new("m-1".into(), false, Some("too salty".into()));
        assert_eq!(feedback.comment.as_deref(), Some("too salty"));
    }
}
