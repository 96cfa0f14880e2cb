use crate::store::mvi::SliceState;

/// Identifies one running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId(pub u64);

/// Selects which loading visualization to show. Carries no business meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderKey {
    Auth,
    Catalog,
    Cart,
    Checkout,
    Orders,
    Inspection,
    Listing,
    Upload,
    Gigs,
}

impl LoaderKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "Signing in",
            Self::Catalog => "Loading catalog",
            Self::Cart => "Updating cart",
            Self::Checkout => "Placing order",
            Self::Orders => "Loading orders",
            Self::Inspection => "Updating inspections",
            Self::Listing => "Saving listing",
            Self::Upload => "Uploading images",
            Self::Gigs => "Loading gigs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSlot {
    pub op: OpId,
    pub key: LoaderKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The single transient dialog used for success and error notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusModal {
    pub kind: StatusKind,
    pub title: String,
    pub message: String,
}

impl StatusModal {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Loaders are a stack of live slots rather than one global flag. Only the
/// top slot is shown, but finishing one operation never hides the loader of
/// another that is still running.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiSliceState {
    pub(crate) loaders: Vec<LoaderSlot>,
    pub(crate) status_modal: Option<StatusModal>,
    pub(crate) tour_open: bool,
}

impl SliceState for UiSliceState {}

impl UiSliceState {
    /// The loader to display, if any operation is in flight.
    pub fn active_loader(&self) -> Option<LoaderKey> {
        self.loaders.last().map(|slot| slot.key)
    }

    pub fn in_flight(&self) -> usize {
        self.loaders.len()
    }

    pub fn status_modal(&self) -> Option<&StatusModal> {
        self.status_modal.as_ref()
    }

    pub fn tour_open(&self) -> bool {
        self.tour_open
    }
}
