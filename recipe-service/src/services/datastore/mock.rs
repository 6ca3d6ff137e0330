//! In-memory datastore for tests.

use super::{Datastore, StoreError};
use crate::models::{Feedback, Message};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Records every inserted row; can be switched into a failing state.
#[derive(Default)]
pub struct MockDatastore {
    messages: Mutex<Vec<Message>>,
    feedback: Mutex<Vec<Feedback>>,
    failing: AtomicBool,
}

impl MockDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every write fails.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("mock datastore set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Datastore for MockDatastore {
    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        self.check()?;
        self.messages
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Mock datastore mutex poisoned: {}", e)))?
            .push(message.clone());
        Ok(())
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.check()?;
        self.feedback
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Mock datastore mutex poisoned: {}", e)))?
            .push(feedback.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check()
    }
}
