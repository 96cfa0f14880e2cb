//! Outbound HTTP to the marketplace backend and the media host.

mod client;
mod error;
mod upload;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind, GENERIC_MESSAGE, NETWORK_MESSAGE, SESSION_MESSAGE};
pub use upload::{ImageFile, UploadDescriptor};
