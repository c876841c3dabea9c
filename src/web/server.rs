use crate::config::ServerConfig;
use crate::error::SmogwatchError;
use crate::web::handlers::{index, location_overview, plot};
use crate::web::state::AppState;
use axum::routing::get;
use axum::Router;
use log::info;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Builds the dashboard router. Every view answers both GET and POST; pre-rendered maps
/// are served from `maps_dir` under `/maps`.
pub fn router(state: Arc<AppState>, maps_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index).post(index))
        .route("/plot", get(plot).post(plot))
        .route("/location_overview", get(location_overview).post(location_overview))
        .nest_service("/maps", ServeDir::new(maps_dir))
        .with_state(state)
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), SmogwatchError> {
    let addr = config.socket_addr();
    let app = router(Arc::new(state), &config.maps_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SmogwatchError::Bind(addr, e))?;
    info!("Serving dashboard on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .map_err(SmogwatchError::Serve)
}
