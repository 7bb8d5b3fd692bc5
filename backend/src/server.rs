use std::sync::Arc;
use std::time::Duration;

use aide::openapi::{Info, OpenApi};
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::inference::TextGeneration;
use crate::music::PlaylistCatalog;
use crate::routes::{self, cors};
use crate::types::{AppError, Environment};

/// Upper bound for a whole request, covering every model attempt of a chat
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Upstream providers the handlers talk to
#[derive(Clone)]
pub struct Providers {
    pub text_generation: Arc<dyn TextGeneration>,
    pub playlist_catalog: Arc<dyn PlaylistCatalog>,
}

/// Builds the application router with all layers and dependencies attached
pub fn router(environment: Environment, providers: Providers) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Wellness Companion API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    let router = routes::handler(&environment)
        .finish_api(&mut openapi)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(providers.text_generation))
        .layer(Extension(providers.playlist_catalog))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    cors::with_cors_headers(router)
}

#[allow(clippy::unused_async)]
async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, providers: Providers) -> anyhow::Result<()> {
    let router = router(environment, providers);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Wellness Companion Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down Wellness Companion Backend...");
}
