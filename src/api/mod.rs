mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::info;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ReelError;
use crate::service::ReelService;

pub use error::ApiError;

pub struct ReelApi {
    service: Arc<ReelService>,
    cors: bool,
}

impl ReelApi {
    pub fn new(service: ReelService) -> Self {
        Self {
            service: Arc::new(service),
            cors: true,
        }
    }

    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(handlers::health))
            .route("/createDB", get(handlers::create_db))
            .route("/queryDB", get(handlers::query_movies))
            .route("/queryMovie", get(handlers::query_movies))
            .route("/dropDB", get(handlers::drop_db))
            .with_state(self.service.clone())
            .layer(TraceLayer::new_for_http());

        if self.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    pub async fn serve(self, addr: &str) -> Result<(), ReelError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ReelError::IoError(format!("binding to {addr}: {e}")))?;
        info!("Listening on {}", addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ReelError::IoError(format!("serving: {e}")))?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
