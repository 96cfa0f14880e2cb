use crate::api::ApiClient;
use crate::config::{SecureString, Session, SessionStore};
use crate::error::FlowError;
use crate::model::{AuthPayload, Credentials, Registration, User};
use crate::services::AuthService;
use crate::store::auth::AuthIntent;
use crate::store::ui::LoaderKey;
use crate::store::{Coordinator, Operation};
use crate::validation;

const LOGIN: Operation = Operation::new(LoaderKey::Auth, "Login failed");
const REGISTER: Operation = Operation::new(LoaderKey::Auth, "Registration failed");
const PROFILE: Operation = Operation::new(LoaderKey::Auth, "Could not load profile");

/// Session lifecycle: sign in, restore, sign out.
///
/// The token lives in three places that must agree: the API client (sent
/// with every request), the session file (survives restarts) and the auth
/// slice (what the UI shows).
#[derive(Clone)]
pub struct AuthFlows {
    coordinator: Coordinator,
    service: AuthService,
    api: ApiClient,
    session: SessionStore,
}

impl AuthFlows {
    pub fn new(
        coordinator: Coordinator,
        service: AuthService,
        api: ApiClient,
        session: SessionStore,
    ) -> Self {
        Self {
            coordinator,
            service,
            api,
            session,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, FlowError> {
        validation::email(email)?;
        validation::required("Password", password)?;

        let credentials = Credentials {
            email: email.trim().to_string(),
            password: SecureString::new(password),
        };
        let payload = self
            .coordinator
            .run(LOGIN, self.service.login(&credentials))
            .await?;
        Ok(self.sign_in(payload))
    }

    pub async fn register(&self, registration: Registration) -> Result<User, FlowError> {
        validation::required("Name", &registration.name)?;
        validation::email(&registration.email)?;
        validation::password(registration.password.expose())?;

        let payload = self
            .coordinator
            .run(REGISTER, self.service.register(&registration))
            .await?;
        Ok(self.sign_in(payload))
    }

    /// Picks up a session saved by an earlier run. Makes no request.
    pub fn restore(&self) -> Option<User> {
        let session = match self.session.load() {
            Ok(session) => session?,
            Err(err) => {
                tracing::warn!(error = %err, "Discarding unreadable session");
                if let Err(err) = self.session.clear() {
                    tracing::warn!(error = %err, "Failed to remove unreadable session");
                }
                return None;
            }
        };

        if session.token.is_empty() {
            tracing::warn!("Saved session has no token, ignoring it");
            return None;
        }

        self.api.set_token(session.token);
        self.coordinator.dispatch(AuthIntent::SignedIn {
            user: session.user.clone(),
        });
        tracing::debug!(user_id = %session.user.id, "Session restored");
        Some(session.user)
    }

    pub async fn refresh_profile(&self) -> Result<User, FlowError> {
        let user = self.coordinator.run(PROFILE, self.service.me()).await?;
        self.coordinator
            .dispatch(AuthIntent::ProfileLoaded { user: user.clone() });
        Ok(user)
    }

    pub fn logout(&self) {
        self.api.clear_token();
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to remove session file");
        }
        let revision = self.coordinator.next_revision();
        self.coordinator.dispatch(AuthIntent::SignedOut { revision });
        tracing::info!("Signed out");
    }

    fn sign_in(&self, payload: AuthPayload) -> User {
        self.api.set_token(payload.token.clone());
        let session = Session {
            token: payload.token,
            user: payload.user.clone(),
        };
        // Still signed in for this run if the file cannot be written.
        if let Err(err) = self.session.save(&session) {
            tracing::warn!(error = %err, "Failed to persist session");
        }
        self.coordinator.dispatch(AuthIntent::SignedIn {
            user: payload.user.clone(),
        });
        tracing::info!(user_id = %payload.user.id, role = ?payload.user.role, "Signed in");
        payload.user
    }
}
