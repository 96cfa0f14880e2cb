//! Pre-flight checks run before a flow touches the network.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{InspectionReport, InspectionRequest, OrderStatus, ProductDraft};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Quantity must be between 1 and {max}")]
    InvalidQuantity { quantity: u32, max: u32 },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Minimum offer is ₹{minimum}")]
    OfferTooLow { offered: u64, minimum: u64 },

    #[error("Choose either a listed product or your own bike")]
    InvalidInspectionTarget,

    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Rating must be between 1 and 5")]
    InvalidRating { rating: u8 },

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("No {entity} with id '{id}' is loaded")]
    UnknownEntity { entity: &'static str, id: String },

    #[error("This {entity} is already {status} and can no longer change")]
    AlreadyTerminal { entity: &'static str, status: String },

    #[error("Order cannot move from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
}

pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    required("Email", value)?;
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn quantity(quantity: u32, max: u32) -> Result<(), ValidationError> {
    if quantity == 0 || quantity > max {
        return Err(ValidationError::InvalidQuantity { quantity, max });
    }
    Ok(())
}

pub fn inspection_request(
    request: &InspectionRequest,
    min_offer: u64,
) -> Result<(), ValidationError> {
    let has_product = request.product_id.as_deref().is_some_and(|id| !id.trim().is_empty());
    let has_bike = request.user_bike_id.as_deref().is_some_and(|id| !id.trim().is_empty());
    if has_product == has_bike {
        return Err(ValidationError::InvalidInspectionTarget);
    }
    if request.offer_amount < min_offer {
        return Err(ValidationError::OfferTooLow {
            offered: request.offer_amount,
            minimum: min_offer,
        });
    }
    date(&request.scheduled_date)
}

/// Checks for a real `YYYY-MM-DD` calendar date. Whether the day is in the
/// future is left to the server.
pub fn date(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: value.to_string(),
    };
    // chrono accepts unpadded fields; the wire format does not.
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(())
}

pub fn report(report: &InspectionReport) -> Result<(), ValidationError> {
    required("Summary", &report.summary)?;
    if !(1..=5).contains(&report.rating) {
        return Err(ValidationError::InvalidRating {
            rating: report.rating,
        });
    }
    Ok(())
}

pub fn listing(draft: &ProductDraft) -> Result<(), ValidationError> {
    required("Title", &draft.title)?;
    if draft.price == 0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// A seller may only move an order one fulfilment step forward.
pub fn order_transition(from: OrderStatus, to: OrderStatus) -> Result<(), ValidationError> {
    if from.is_terminal() {
        return Err(ValidationError::AlreadyTerminal {
            entity: "order",
            status: from.to_string(),
        });
    }
    if from.next() != Some(to) {
        return Err(ValidationError::IllegalTransition { from, to });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(offer: u64) -> InspectionRequest {
        InspectionRequest {
            product_id: Some("p1".into()),
            user_bike_id: None,
            offer_amount: offer,
            scheduled_date: "2026-12-01".into(),
            notes: None,
        }
    }

    #[test]
    fn offer_below_minimum_is_rejected() {
        assert_eq!(
            inspection_request(&request(400), 500),
            Err(ValidationError::OfferTooLow {
                offered: 400,
                minimum: 500
            })
        );
        assert!(inspection_request(&request(500), 500).is_ok());
    }

    #[test]
    fn inspection_needs_exactly_one_target() {
        let mut both = request(600);
        both.user_bike_id = Some("b1".into());
        assert_eq!(
            inspection_request(&both, 500),
            Err(ValidationError::InvalidInspectionTarget)
        );

        let mut neither = request(600);
        neither.product_id = None;
        assert_eq!(
            inspection_request(&neither, 500),
            Err(ValidationError::InvalidInspectionTarget)
        );
    }

    #[test]
    fn dates() {
        assert!(date("2028-02-29").is_ok());
        assert!(date("2027-02-29").is_err());
        assert!(date("2026-13-01").is_err());
        assert!(date("2026-1-01").is_err());
        assert!(date("2026-04-31").is_err());
        assert!(date("tomorrow").is_err());
    }

    #[test]
    fn quantity_bounds() {
        assert!(quantity(1, 10).is_ok());
        assert!(quantity(10, 10).is_ok());
        assert!(quantity(0, 10).is_err());
        assert!(quantity(11, 10).is_err());
    }

    #[test]
    fn emails() {
        assert!(email("a@b.in").is_ok());
        assert_eq!(email("nobody"), Err(ValidationError::InvalidEmail));
        assert_eq!(
            email("  "),
            Err(ValidationError::MissingField { field: "Email" })
        );
    }

    #[test]
    fn order_transitions() {
        assert!(order_transition(OrderStatus::Paid, OrderStatus::Processing).is_ok());
        assert!(matches!(
            order_transition(OrderStatus::Paid, OrderStatus::Shipped),
            Err(ValidationError::IllegalTransition { .. })
        ));
        assert!(matches!(
            order_transition(OrderStatus::Delivered, OrderStatus::Delivered),
            Err(ValidationError::AlreadyTerminal { .. })
        ));
    }

    #[test]
    fn report_rating_range() {
        let mut report = InspectionReport {
            summary: "Good".into(),
            rating: 0,
            notes: None,
        };
        assert!(matches!(
            super::report(&report),
            Err(ValidationError::InvalidRating { rating: 0 })
        ));
        report.rating = 5;
        assert!(super::report(&report).is_ok());
    }
}
