//! Headless client for the rebike marketplace.
//!
//! Buyers browse refurbished bikes and parts, manage a cart, check out and
//! book inspections; sellers manage listings and fulfil orders; mechanics
//! take inspection gigs. All business rules live on the REST backend. This
//! crate holds client state and runs the request lifecycle around each call.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod flows;
pub mod logging;
pub mod model;
pub mod services;
pub mod store;
pub mod validation;

pub use app::App;
pub use error::FlowError;
