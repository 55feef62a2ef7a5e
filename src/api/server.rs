//! API server lifecycle — binds the listener, serves the router, and
//! supports graceful shutdown.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. `main` keeps the handle alive until ctrl-c; tests start on
//! an ephemeral port and drive the server over real HTTP.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    pub local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Bind the configured address, build the router, and spawn the axum
/// server in a background tokio task.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%local_addr, "API server binding");

    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%local_addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{Config, InferenceConfig};
    use crate::inference::MockInferenceClient;

    /// Start a server over a scratch database on an ephemeral port.
    /// The tempdir guard must be kept alive for the duration of the test.
    async fn start_test_server() -> (ApiServer, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let config = Arc::new(Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_path: tmp.path().join("symcheck.db"),
            frontend_origin: "http://localhost:5173".into(),
            session_ttl_secs: 3600,
            inference: InferenceConfig {
                base_url: "http://mock.invalid".into(),
                app_id: "test-id".into(),
                app_key: "test-key".into(),
                timeout_secs: 5,
            },
        });
        let ctx = ApiContext::new(config.clone(), Arc::new(MockInferenceClient::new())).unwrap();
        let server = start_server(ctx, config.bind_addr).await.expect("server should start");
        (server, tmp)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (mut server, _tmp) = start_test_server().await;
        assert!(server.local_addr.port() > 0);

        let url = format!("http://{}/api/health", server.local_addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        // Give server time to stop
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn protected_routes_reject_over_real_http() {
        let (mut server, _tmp) = start_test_server().await;

        let url = format!("http://{}/api/symptoms", server.local_addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        server.shutdown();
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (mut server, _tmp) = start_test_server().await;

        let url = format!("http://{}/nonexistent", server.local_addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _tmp) = start_test_server().await;
        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
