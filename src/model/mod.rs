//! Wire entities shared by services, slices and the CLI.
//!
//! The backend speaks camelCase JSON and sometimes returns Mongo-style `_id`
//! fields, so every id accepts both spellings.

mod cart;
mod catalog;
mod inspection;
mod order;
mod user;

pub use cart::{Cart, CartItem};
pub use catalog::{Category, Product, ProductDraft, ProductKind};
pub use inspection::{Inspection, InspectionReport, InspectionRequest, InspectionStatus};
pub use order::{Order, OrderItem, OrderStatus};
pub use user::{AuthPayload, Credentials, Registration, Role, User};

/// Last six characters of an id, used for user-facing confirmation text.
pub fn short_id(id: &str) -> &str {
    let count = id.chars().count();
    if count <= 6 {
        return id;
    }
    let start = id
        .char_indices()
        .nth(count - 6)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &id[start..]
}
