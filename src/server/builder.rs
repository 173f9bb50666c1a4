//! ServerBuilder for fluent API to build the HTTP server

use super::entity_registry::EntityRegistry;
use super::state::AppState;
use crate::core::error::ErrorResponse;
use crate::encoding::RoutePaths;
use crate::entities::{
    AttendeeDescriptor, ConferenceDescriptor, LocationDescriptor, PresentationDescriptor,
};
use anyhow::Result;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Name reported by the health routes
pub const SERVICE_NAME: &str = "conference-api";

/// Builder for the conference API router
///
/// # Example
///
/// ```ignore
/// let state = AppState::in_memory(RoutePaths::default());
/// let app = ServerBuilder::new()
///     .with_state(state)
///     .with_base_path("/api")
///     .build()?;
/// ```
pub struct ServerBuilder {
    state: Option<AppState>,
    base_path: String,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            state: None,
            base_path: String::new(),
        }
    }

    /// Set the application state (required)
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Mount the entity routes under a path prefix.
    ///
    /// Use the same prefix as the state's link builder so `href` values point
    /// at mounted routes.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = RoutePaths::new(base_path).base_path().to_string();
        self
    }

    /// Build the final router
    ///
    /// This generates:
    /// - CRUD routes for locations, conferences, attendees and presentations
    /// - Health check routes
    /// - A JSON 404 for unknown paths
    pub fn build(mut self) -> Result<Router> {
        let state = self
            .state
            .take()
            .ok_or_else(|| anyhow::anyhow!("AppState is required. Call .with_state()"))?;

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(LocationDescriptor::new(state.clone())));
        registry.register(Box::new(ConferenceDescriptor::new(state.clone())));
        registry.register(Box::new(AttendeeDescriptor::new(state.clone())));
        registry.register(Box::new(PresentationDescriptor::new(state)));

        let api = registry.build_routes();

        let app = if self.base_path.is_empty() {
            health_routes().merge(api)
        } else {
            health_routes().nest(&self.base_path, api)
        };

        tracing::debug!(
            base_path = %self.base_path,
            entities = ?registry.entity_kinds(),
            "router built"
        );

        Ok(app.fallback(route_not_found).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "Not found".to_string(),
        }),
    )
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.state.is_none());
        assert!(builder.base_path.is_empty());
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert!(builder.state.is_none());
        assert!(builder.base_path.is_empty());
    }

    #[test]
    fn test_with_base_path_normalizes() {
        let builder = ServerBuilder::new().with_base_path("api/");
        assert_eq!(builder.base_path, "/api");

        let builder = ServerBuilder::new().with_base_path("/");
        assert_eq!(builder.base_path, "");
    }

    #[test]
    fn test_build_without_state_fails() {
        let result = ServerBuilder::new().build();
        let err = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("AppState is required"));
    }

    #[tokio::test]
    async fn test_build_with_state_succeeds() {
        let state = AppState::in_memory(RoutePaths::default());
        assert!(ServerBuilder::new().with_state(state).build().is_ok());
    }
}
