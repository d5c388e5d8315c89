//! HTTP API Server
//!
//! Builds the axum application and runs it.

use axum::Router;
use axum::http::HeaderValue;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use guru_core::{Config, OpenAiApi, PracticeCatalog};
use guru_voice::SpeechStreamer;

use crate::routes::routes;

/// Shared application state
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub openai: Arc<dyn OpenAiApi>,
    pub speech: Arc<dyn SpeechStreamer>,
    pub catalog: Arc<PracticeCatalog>,
}

impl AppState {
    pub fn new(
        config: Config,
        openai: Arc<dyn OpenAiApi>,
        speech: Arc<dyn SpeechStreamer>,
        catalog: PracticeCatalog,
    ) -> Self {
        Self {
            config: Arc::new(config),
            openai,
            speech,
            catalog: Arc::new(catalog),
        }
    }
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config.api.allowed_origins.as_deref());

    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP API server and run until `shutdown` resolves
pub async fn start_server(
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let port = state.config.api.port;
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
