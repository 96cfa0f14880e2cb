//! In-process stand-in for the marketplace backend and the media host.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: br#"{"ok": true}"#.to_vec(),
            delay_ms: 0,
        }
    }
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    /// An error shaped like the backend's `{"message": ...}` bodies.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "message": message })
                .to_string()
                .into_bytes(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Default)]
struct Recorder {
    requests: Vec<CapturedRequest>,
    queue: VecDeque<MockResponse>,
}

type SharedRecorder = Arc<Mutex<Recorder>>;

/// Answers every request with the next queued response, in order. Serves
/// both the REST API (under `/api`) and the media host (`/media/upload`).
pub struct MockBackend {
    pub addr: SocketAddr,
    recorder: SharedRecorder,
    shutdown: watch::Sender<bool>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let recorder = SharedRecorder::default();
        let (shutdown, mut stop) = watch::channel(false);

        let router = Router::new()
            .fallback(respond)
            .with_state(recorder.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stop.changed().await;
                })
                .await;
        });

        Self {
            addr,
            recorder,
            shutdown,
        }
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.recorder.lock().await.queue.push_back(response);
    }

    pub async fn enqueue_json(&self, body: &str) {
        self.enqueue_response(MockResponse::json(body)).await;
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.recorder.lock().await.requests.clone()
    }

    /// `METHOD /path` for each captured request, in arrival order.
    pub async fn request_lines(&self) -> Vec<String> {
        self.captured_requests()
            .await
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Value for `api.base_url`.
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Value for a signed descriptor's `uploadUrl`.
    pub fn media_url(&self) -> String {
        format!("http://{}/media/upload", self.addr)
    }

    /// Forget captured requests and drop queued responses.
    pub async fn clear(&self) {
        let mut recorder = self.recorder.lock().await;
        recorder.requests.clear();
        recorder.queue.clear();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn respond(
    State(recorder): State<SharedRecorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let next = {
        let mut recorder = recorder.lock().await;
        recorder.requests.push(CapturedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
                .collect(),
            body: body.to_vec(),
        });
        recorder.queue.pop_front().unwrap_or_default()
    };

    if next.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(next.delay_ms)).await;
    }

    let status = StatusCode::from_u16(next.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, next.body).into_response();
    for (name, value) in next.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(&value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}
