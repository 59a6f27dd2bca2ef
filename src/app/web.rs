//! Web interface server.
//!
//! # Responsibilities
//! - Serve the landing page the browser launcher opens
//! - Expose basic server info as JSON
//! - Stop accepting and drain when shutdown is broadcast

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

/// Body of `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub config_dir: String,
    pub http_port: u16,
}

/// HTTP server for the web interface.
pub struct WebServer {
    router: Router,
}

impl WebServer {
    pub fn new(info: ServerInfo) -> Self {
        Self {
            router: Self::build_router(Arc::new(info)),
        }
    }

    fn build_router(info: Arc<ServerInfo>) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/info", get(server_info))
            .with_state(info)
            .layer(TraceLayer::new_for_http())
    }

    /// Router without a listener attached.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Web server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Web server received shutdown signal");
            })
            .await?;

        tracing::info!("Web server stopped");
        Ok(())
    }
}

async fn index(State(info): State<Arc<ServerInfo>>) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{name}</title></head>\
         <body><h1>{name}</h1><p>Version {version}</p></body></html>",
        name = info.name,
        version = info.version,
    ))
}

async fn server_info(State(info): State<Arc<ServerInfo>>) -> Json<ServerInfo> {
    Json(info.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn info() -> ServerInfo {
        ServerInfo {
            name: "Music Assistant".into(),
            version: "0.1.0".into(),
            config_dir: "/tmp/mass".into(),
            http_port: 8095,
        }
    }

    #[tokio::test]
    async fn test_info_endpoint() {
        let router = WebServer::new(info()).router();
        let response = router
            .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let body: ServerInfo = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, info());
    }

    #[tokio::test]
    async fn test_index_page() {
        let router = WebServer::new(info()).router();
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<h1>Music Assistant</h1>"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = WebServer::new(info()).router();
        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = broadcast::channel(1);
        let task = tokio::spawn(WebServer::new(info()).run(listener, rx));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), task)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
