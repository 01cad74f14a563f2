mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::api::{DynAPI, API};
use crate::server::handlers::{addresses, links, routes, submissions};

pub fn router(api: DynAPI) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(routes::root).post(routes::create))
        .route("/api/path", post(routes::create))
        .route("/api/v1", get(routes::root).post(routes::create))
        .route(
            "/api/v1/addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/api/v1/addresses/:id",
            patch(addresses::edit).delete(addresses::delete),
        )
        .route("/api/v1/addresses/:id/role", patch(addresses::set_role))
        .route(
            "/api/v1/addresses/:id/selected",
            patch(addresses::toggle_selected),
        )
        .route(
            "/api/v1/submission",
            get(submissions::find)
                .post(submissions::create)
                .delete(submissions::clear),
        )
        .route("/api/v1/links/search", get(links::search))
        .route("/api/v1/links/directions", get(links::directions))
        .layer(Extension(api))
        .layer(cors)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {}", err);
    }

    tracing::info!("server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install terminate handler: {}", err);
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

    tracing::info!("shutdown signal received");
}
