use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::timeout;

use crate::api::error::ApiError;
use crate::config::{ApiConfig, SecureString};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the marketplace backend.
///
/// Cloning is cheap and all clones share the same bearer token, so a 401
/// seen by any caller drops the session for everyone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    token: Arc<RwLock<Option<SecureString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|source| ApiError::Connection {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn set_token(&self, token: SecureString) {
        *self.token.write() = Some(token);
    }

    pub fn clear_token(&self) {
        self.token.write().take();
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        decode(response, path).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let outgoing = self.request(Method::GET, path).map(|b| b.query(query));
        let response = self.send(outgoing, path).await?;
        decode(response, path).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    /// POST without the bearer token, for login and registration.
    pub async fn post_anonymous<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let outgoing = self.anonymous(Method::POST, path).map(|b| b.json(body));
        let response = self.send(outgoing, path).await?;
        decode(response, path).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Sends a mutating request whose response body is not needed.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut outgoing = self.request(method, path);
        if let Some(body) = body {
            outgoing = outgoing.map(|b| b.json(body));
        }
        self.send(outgoing, path).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, path, None).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let outgoing = self.request(method, path).map(|b| b.json(body));
        let response = self.send(outgoing, path).await?;
        decode(response, path).await
    }

    fn anonymous(&self, method: Method, path: &str) -> Outgoing {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, %url, %request_id, "API request");

        Outgoing {
            builder: self
                .http
                .request(method, url)
                .header(REQUEST_ID_HEADER, request_id),
            authenticated: false,
        }
    }

    fn request(&self, method: Method, path: &str) -> Outgoing {
        let mut outgoing = self.anonymous(method, path);
        if let Some(token) = self.token.read().as_ref() {
            outgoing.builder = outgoing
                .builder
                .header(AUTHORIZATION, format!("Bearer {}", token.expose()));
            outgoing.authenticated = true;
        }
        outgoing
    }

    /// Executes the request under the fixed timeout and turns non-success
    /// statuses into classified errors.
    async fn send(&self, outgoing: Outgoing, path: &str) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = match timeout(self.request_timeout, outgoing.builder.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(source)) if source.is_timeout() => {
                return Err(ApiError::Timeout {
                    duration: self.request_timeout.as_secs(),
                })
            }
            Ok(Err(source)) => return Err(ApiError::Connection { url, source }),
            Err(_) => {
                return Err(ApiError::Timeout {
                    duration: self.request_timeout.as_secs(),
                })
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let mut err = ApiError::from_response(status.as_u16(), &body);
        if let ApiError::Unauthorized {
            session_rejected, ..
        } = &mut err
        {
            if outgoing.authenticated {
                *session_rejected = true;
                self.token.write().take();
                tracing::warn!(path, "Session rejected by server, token dropped");
            }
        }
        Err(err)
    }
}

/// A prepared request and whether it carries the bearer token.
struct Outgoing {
    builder: RequestBuilder,
    authenticated: bool,
}

impl Outgoing {
    fn map(self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        Self {
            builder: f(self.builder),
            authenticated: self.authenticated,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|e| ApiError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
