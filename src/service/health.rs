//! HTTP liveness endpoint.
//!
//! A single `GET /` route that always answers `200 OK` so a process supervisor
//! can confirm the bot accepts connections. It shares no state with the chat listener.

use axum::{Router, http::StatusCode, routing::get};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::base::{config::Config, types::Void};

/// Body returned by the liveness route.
pub const HEALTH_BODY: &str = "Bot is running!";

/// Liveness handler.
async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_BODY)
}

/// Build the liveness router.
pub fn router() -> Router {
    Router::new().route("/", get(health_check))
}

/// Bind `BIND_HOST:PORT` and serve the liveness router until the server fails.
#[instrument(skip_all)]
pub async fn serve(config: &Config) -> Void {
    let listener = TcpListener::bind((config.bind_host.as_str(), config.port)).await?;

    info!("Health check listening on {}", listener.local_addr()?);

    serve_on(listener).await
}

/// Serve the liveness router on an already bound listener.
pub async fn serve_on(listener: TcpListener) -> Void {
    axum::serve(listener, router()).await?;

    Ok(())
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(serve_on(listener));

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let base = spawn_server().await;

        let response = reqwest::get(format!("{base}/")).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "Bot is running!");
    }

    #[tokio::test]
    async fn test_health_check_is_idempotent() {
        let base = spawn_server().await;

        for _ in 0..3 {
            let response = reqwest::get(format!("{base}/?probe=1")).await.unwrap();

            assert_eq!(response.status(), reqwest::StatusCode::OK);
            assert_eq!(response.text().await.unwrap(), HEALTH_BODY);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let base = spawn_server().await;

        let response = reqwest::get(format!("{base}/missing")).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
