//! A one-shot axum stub standing in for the analysis service

use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::Router;
use dosesafe_client::ApiClient;
use dosesafe_core::Config;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the stub saw of the client's request
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: String,
    pub body: String,
}

impl CapturedRequest {
    async fn read(request: Request) -> Self {
        let (parts, body) = request.into_parts();
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        Self {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

pub fn client_for(base_url: &str) -> ApiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClient::with_http_client(Config::new().with_api_url(base_url), http)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Answer any request with `status` and JSON `body`. The receiver yields the
/// first request received.
pub async fn serve_once(
    status: u16,
    body: &'static str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));
    let status = StatusCode::from_u16(status).unwrap();

    let app = Router::new().fallback(move |request: Request| {
        let tx = tx.clone();
        async move {
            let captured = CapturedRequest::read(request).await;
            let sender = tx.lock().unwrap().take();
            if let Some(sender) = sender {
                let _ = sender.send(captured);
            }
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), rx)
}
