use crate::store::mvi::Intent;

use super::state::{LoaderKey, OpId, StatusModal};

#[derive(Debug, Clone)]
pub enum UiIntent {
    /// An operation started and wants a loader.
    LoaderAcquired { op: OpId, key: LoaderKey },

    /// The operation settled (or was dropped). Always sent, whatever the outcome.
    LoaderReleased { op: OpId },

    ShowStatus(StatusModal),

    DismissStatus,

    SetTourOpen(bool),
}

impl Intent for UiIntent {}
