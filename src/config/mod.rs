//! Client configuration and persisted session.

mod credentials;
mod loader;
mod session;
mod types;

pub use credentials::SecureString;
pub use loader::{ConfigError, API_URL_ENV};
pub use session::{Session, SessionError, SessionStore};
pub use types::{ApiConfig, Config, MarketplaceConfig, SessionConfig};
