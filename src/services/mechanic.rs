use serde_json::json;

use crate::api::{ApiClient, ApiError};
use crate::model::{Inspection, InspectionReport};

#[derive(Clone)]
pub struct MechanicService {
    api: ApiClient,
}

impl MechanicService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Open gigs nobody has accepted yet.
    pub async fn available(&self) -> Result<Vec<Inspection>, ApiError> {
        self.api.get("/mechanic/inspections/available").await
    }

    /// Gigs assigned to the logged-in mechanic.
    pub async fn assigned(&self) -> Result<Vec<Inspection>, ApiError> {
        self.api.get("/mechanic/inspections").await
    }

    pub async fn accept(&self, inspection_id: &str) -> Result<Inspection, ApiError> {
        self.api
            .patch(
                &format!("/mechanic/inspections/{}/accept", inspection_id),
                &json!({}),
            )
            .await
    }

    pub async fn reject(&self, inspection_id: &str) -> Result<Inspection, ApiError> {
        self.api
            .patch(
                &format!("/mechanic/inspections/{}/reject", inspection_id),
                &json!({}),
            )
            .await
    }

    pub async fn submit_report(
        &self,
        inspection_id: &str,
        report: &InspectionReport,
    ) -> Result<Inspection, ApiError> {
        self.api
            .post(
                &format!("/mechanic/inspections/{}/report", inspection_id),
                &json!({ "reportData": report }),
            )
            .await
    }
}
