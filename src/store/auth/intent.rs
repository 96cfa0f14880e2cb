use crate::model::User;
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum AuthIntent {
    /// Login, registration or a restored session.
    SignedIn { user: User },

    ProfileLoaded { user: User },

    /// Responses holding a ticket at or below `revision` belong to the old
    /// user and are dropped.
    SignedOut { revision: u64 },

    SessionExpired,
}

impl Intent for AuthIntent {}
