use crate::model::User;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticated,
    /// The backend answered 401; the user has to sign in again.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSliceState {
    pub user: Option<User>,
    pub status: AuthStatus,
}

impl SliceState for AuthSliceState {}

impl AuthSliceState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}
