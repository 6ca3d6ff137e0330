//! Application startup and lifecycle management.

use crate::config::RecipeConfig;
use crate::services::{
    Datastore, IngredientService, RecipeService, RemoteIngredientService, RemoteRecipeService,
    StaticIngredientService, StaticRecipeService, SupabaseStore,
};
use crate::{build_router, AppState};
use service_core::error::AppError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Wire the datastore and upstream adapters from configuration.
///
/// An upstream without a configured URL is replaced by a static adapter
/// that answers with an empty result.
pub fn build_state(config: RecipeConfig) -> Result<AppState, AppError> {
    let datastore: Arc<dyn Datastore> = Arc::new(
        SupabaseStore::new(&config.supabase, config.persistence.timeout)
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
    );

    let ingredient_service: Arc<dyn IngredientService> =
        match &config.upstream.ingredient_service_url {
            Some(url) => {
                tracing::info!(url = %url, "Using remote ingredient service");
                Arc::new(
                    RemoteIngredientService::new(url.clone(), config.upstream.timeout)
                        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
                )
            }
            None => {
                tracing::warn!("INGREDIENT_SERVICE_URL not set, substitutions will be empty");
                Arc::new(StaticIngredientService::empty())
            }
        };

    let recipe_service: Arc<dyn RecipeService> = match &config.upstream.recipe_service_url {
        Some(url) => {
            tracing::info!(url = %url, "Using remote recipe service");
            Arc::new(
                RemoteRecipeService::new(url.clone(), config.upstream.timeout)
                    .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        }
        None => {
            tracing::warn!("RECIPE_SERVICE_URL not set, suggestions will be empty");
            Arc::new(StaticRecipeService::empty())
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        datastore,
        ingredient_service,
        recipe_service,
    })
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let state = build_state(config)?;
        Self::with_state(state).await
    }

    /// Bind the listener for a prepared state (port 0 = random port for testing).
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let addr = state.config.common.bind_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let http_port = listener.local_addr()?.port();

        tracing::info!(
            port = http_port,
            persistence_mode = ?state.config.persistence.mode,
            "Recipe service configured"
        );

        Ok(Self {
            http_port,
            listener,
            state,
        })
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        let router = build_router(self.state);

        tracing::info!("HTTP server listening on port {}", self.http_port);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                AppError::from(e)
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
