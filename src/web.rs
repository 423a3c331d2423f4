use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::FloodAidConfig;
use crate::pipeline::FloodWatch;
use crate::relief;
use crate::{FloodAidError, Result};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api::router(state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

pub async fn run(config: &FloodAidConfig) -> Result<()> {
    let state = AppState {
        watch: Arc::new(FloodWatch::open_meteo(&config.weather)?),
        directory: relief::directory(),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app(state))
        .await
        .map_err(|e| FloodAidError::general(format!("Server stopped unexpectedly: {e}")))
}
