//! Shared setup for recipe-service integration tests.
//!
//! Builds the real router over a `MockDatastore` and static service stubs,
//! so no network or hosted datastore is needed.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use recipe_service::{
    build_router,
    config::{
        CorsConfig, GenerationConfig, ModelConfig, PathConfig, PersistenceConfig,
        PersistenceMode, RecipeConfig, SupabaseConfig, UpstreamConfig,
    },
    services::{
        IngredientService, MockDatastore, RecipeService, StaticIngredientService,
        StaticRecipeService,
    },
    AppState,
};
use secrecy::Secret;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub fn test_config() -> RecipeConfig {
    RecipeConfig {
        common: service_core::config::Config {
            port: 0,
            ..Default::default()
        },
        supabase: SupabaseConfig {
            url: "http://127.0.0.1:9".to_string(),
            service_key: Secret::new("test-service-key".to_string()),
        },
        models: ModelConfig {
            openai_model: "gpt-4o-mini".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
        },
        generation: GenerationConfig::default(),
        paths: PathConfig::default(),
        cors: CorsConfig {
            allowed_origins: vec![TEST_ORIGIN.to_string()],
        },
        persistence: PersistenceConfig {
            mode: PersistenceMode::Awaited,
            timeout: Duration::from_secs(2),
        },
        upstream: UpstreamConfig {
            ingredient_service_url: None,
            recipe_service_url: None,
            timeout: Duration::from_secs(2),
        },
    }
}

/// Router plus handles to the fakes behind it.
pub struct TestApp {
    pub router: Router,
    pub datastore: Arc<MockDatastore>,
}

pub struct TestAppBuilder {
    config: RecipeConfig,
    datastore: Arc<MockDatastore>,
    ingredient_service: Arc<dyn IngredientService>,
    recipe_service: Arc<dyn RecipeService>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            datastore: Arc::new(MockDatastore::new()),
            ingredient_service: Arc::new(StaticIngredientService::empty()),
            recipe_service: Arc::new(StaticRecipeService::empty()),
        }
    }

    pub fn datastore(mut self, datastore: MockDatastore) -> Self {
        self.datastore = Arc::new(datastore);
        self
    }

    pub fn ingredient_service(mut self, service: impl IngredientService + 'static) -> Self {
        self.ingredient_service = Arc::new(service);
        self
    }

    pub fn recipe_service(mut self, service: impl RecipeService + 'static) -> Self {
        self.recipe_service = Arc::new(service);
        self
    }

    pub fn persistence_mode(mut self, mode: PersistenceMode) -> Self {
        self.config.persistence.mode = mode;
        self
    }

    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.config.upstream.timeout = timeout;
        self
    }

    pub fn state(self) -> (AppState, Arc<MockDatastore>) {
        let datastore = self.datastore.clone();
        let state = AppState {
            config: Arc::new(self.config),
            datastore: self.datastore,
            ingredient_service: self.ingredient_service,
            recipe_service: self.recipe_service,
        };
        (state, datastore)
    }

    pub fn build(self) -> TestApp {
        let (state, datastore) = self.state();
        TestApp {
            router: build_router(state),
            datastore,
        }
    }
}

impl TestApp {
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }
}
