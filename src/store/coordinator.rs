//! The request-lifecycle orchestrator.
//!
//! Every flow runs its backend call through [`Coordinator::run`], which
//! shows a loader for exactly as long as the call is in flight and turns a
//! failure into the status modal. State is only ever written here, through
//! [`Coordinator::dispatch`].

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{ApiError, ErrorKind};
use crate::config::SessionStore;
use crate::error::FlowError;
use crate::store::auth::AuthIntent;
use crate::store::mvi::Reducer;
use crate::store::ui::{LoaderKey, OpId, StatusModal, UiIntent};
use crate::store::{AppIntent, AppReducer, AppState};

/// Presentation details for one orchestrated call.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub key: LoaderKey,
    /// Modal title when the call fails for a reason specific to it.
    pub failure_title: &'static str,
}

impl Operation {
    pub const fn new(key: LoaderKey, failure_title: &'static str) -> Self {
        Self { key, failure_title }
    }
}

/// Owner of the application state. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<AppState>,
    next_op: AtomicU64,
    next_revision: AtomicU64,
    session: Option<SessionStore>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Coordinator {
    /// `session` is removed from disk when the backend rejects the token.
    pub fn new(session: Option<SessionStore>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                next_op: AtomicU64::new(1),
                next_revision: AtomicU64::new(1),
                session,
            }),
        }
    }

    pub fn dispatch(&self, intent: impl Into<AppIntent>) {
        let intent = intent.into();
        self.inner.state.send_modify(move |state| {
            let current = std::mem::take(state);
            *state = AppReducer::reduce(current, intent);
        });
    }

    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Reads state without cloning it. Do not block inside `f`.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Change notifications for a presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    /// Ticket for a re-fetch. Take it before the request suspends.
    pub fn next_revision(&self) -> u64 {
        self.inner.next_revision.fetch_add(1, Ordering::Relaxed)
    }

    pub fn notify_success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.dispatch(UiIntent::ShowStatus(StatusModal::success(title, message)));
    }

    pub fn dismiss_status(&self) {
        self.dispatch(UiIntent::DismissStatus);
    }

    pub fn set_tour_open(&self, open: bool) {
        self.dispatch(UiIntent::SetTourOpen(open));
    }

    /// Runs `call` with a loader shown for its whole lifetime.
    ///
    /// The loader is released on every exit path, including `call`
    /// panicking or the returned future being dropped before it settles.
    /// On failure the error is shown in the status modal and state is left
    /// as it was; the caller gets the error back only as a marker.
    pub async fn run<T, F>(&self, operation: Operation, call: F) -> Result<T, FlowError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let op = OpId(self.inner.next_op.fetch_add(1, Ordering::Relaxed));
        self.dispatch(UiIntent::LoaderAcquired {
            op,
            key: operation.key,
        });
        let release = scopeguard::guard(self.clone(), move |coordinator| {
            coordinator.dispatch(UiIntent::LoaderReleased { op });
        });

        let result = call.await;
        drop(release);

        result.map_err(|err| {
            self.report_failure(operation, &err);
            FlowError::Api(err)
        })
    }

    fn report_failure(&self, operation: Operation, err: &ApiError) {
        let kind = err.kind();
        tracing::warn!(
            operation = operation.failure_title,
            ?kind,
            error = %err,
            "Operation failed"
        );

        let title = match kind {
            ErrorKind::Session => "Session expired",
            ErrorKind::Network => "Network error",
            ErrorKind::Conflict | ErrorKind::LimitExceeded | ErrorKind::Server => {
                operation.failure_title
            }
        };

        if kind == ErrorKind::Session {
            self.expire_session();
        }
        self.dispatch(UiIntent::ShowStatus(StatusModal::error(
            title,
            err.user_message(),
        )));
    }

    fn expire_session(&self) {
        if let Some(store) = &self.inner.session {
            if let Err(err) = store.clear() {
                tracing::warn!(error = %err, "Failed to remove expired session");
            }
        }
        self.dispatch(AuthIntent::SessionExpired);
    }
}
