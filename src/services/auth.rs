use crate::api::{ApiClient, ApiError};
use crate::model::{AuthPayload, Credentials, Registration, User};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthPayload, ApiError> {
        self.api.post_anonymous("/auth/register", registration).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.api.post_anonymous("/auth/login", credentials).await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.api.get("/auth/me").await
    }
}
