use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    Pending,
    Accepted,
    Completed,
    Rejected,
    Cancelled,
}

impl InspectionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mechanic's findings, attached when an inspection completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub summary: String,
    /// Overall condition, 1 (poor) to 5 (excellent).
    pub rating: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An inspection or service gig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub user_bike_id: Option<String>,
    pub offer_amount: u64,
    pub status: InspectionStatus,
    pub scheduled_date: String,
    #[serde(default)]
    pub report_data: Option<InspectionReport>,
    #[serde(default)]
    pub mechanic_id: Option<String>,
}

/// Buyer payload for booking an inspection. Exactly one target is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_bike_id: Option<String>,
    pub offer_amount: u64,
    /// ISO-8601 date (`YYYY-MM-DD`).
    pub scheduled_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
