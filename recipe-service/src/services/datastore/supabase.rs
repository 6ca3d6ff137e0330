//! Supabase (PostgREST) row inserts over HTTP.

use super::{Datastore, StoreError, FEEDBACK_TABLE, MESSAGES_TABLE};
use crate::config::SupabaseConfig;
use crate::models::{Feedback, Message};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Shared handle to the hosted datastore. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseStore {
    base_url: String,
    service_key: Secret<String>,
    client: Client,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(url = %config.url, "Initialized Supabase datastore client");

        Ok(Self {
            base_url: config.url.clone(),
            service_key: config.service_key.clone(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        table: &'static str,
        row: &T,
    ) -> Result<(), StoreError> {
        let key = self.service_key.expose_secret();

        let response = self
            .client
            .traced_post(&self.table_url(table))
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Unavailable(format!("insert into '{}' timed out", table))
                } else {
                    StoreError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                table,
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(table = %table, "Row inserted");
        Ok(())
    }
}

#[async_trait]
impl Datastore for SupabaseStore {
    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        self.insert_row(MESSAGES_TABLE, message).await
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.insert_row(FEEDBACK_TABLE, feedback).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let key = self.service_key.expose_secret();
        let response = self
            .client
            .traced_get(&format!("{}/rest/v1/", self.base_url))
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(StoreError::Unavailable(format!(
                "Supabase returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseStore {
        SupabaseStore::new(
            &SupabaseConfig {
                url: "https://abc.supabase.co".to_string(),
                service_key: Secret::new("service-key".to_string()),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        assert_eq!(
            store().table_url(MESSAGES_TABLE),
            "https://abc.supabase.co/rest/v1/messages"
        );
        assert_eq!(
            store().table_url(FEEDBACK_TABLE),
            "https://abc.supabase.co/rest/v1/feedback"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let store = SupabaseStore::new(
            &SupabaseConfig {
                url: "http://127.0.0.1:9".to_string(),
                service_key: Secret::new("k".to_string()),
            },
            Duration::from_secs(2),
        )
        .unwrap();

        let message = Message::from_user("m".into(), "s".into(), "hi".into());
        let err = store.insert_message(&message).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Connection(_) | StoreError::Unavailable(_)
        ));
    }
}
