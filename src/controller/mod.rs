use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tokio::signal;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::config::{Config, PlacesConfig};
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::places_gateway::PlacesGateway;

pub mod health_check;
pub mod places_controller;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<PlacesGateway>,
}

impl AppState {
    pub fn new(places_config: PlacesConfig) -> anyhow::Result<Self> {
        Ok(Self {
            gateway: Arc::new(PlacesGateway::new(places_config)?),
        })
    }
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::new(PlacesConfig::from(&config.places))?;
    if config.places.google_maps_api_key.is_none() {
        tracing::warn!("GOOGLE_MAPS_API_KEY is not set, every places endpoint will fail");
    }

    let origins = parse_origins(&config.origin_urls)?;

    let application = router_endpoints(app_state).layer(
        ServiceBuilder::new()
            .layer(CompressionLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_origin(origins)
                    .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
            )
            .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests)),
    );

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on {} ({})", address, config.environment);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router(app_state.clone())
        .nest("/places", places_controller::router(app_state))
        .fallback(page_not_found_handler)
}

fn parse_origins(origin_urls: &str) -> anyhow::Result<Vec<HeaderValue>> {
    origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin url: {}", s))
        })
        .collect()
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
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
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

    info!("Shutting down API server");
}
