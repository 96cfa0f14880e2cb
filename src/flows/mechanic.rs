use crate::error::FlowError;
use crate::model::{short_id, Inspection, InspectionReport};
use crate::services::MechanicService;
use crate::store::mechanic::MechanicIntent;
use crate::store::ui::LoaderKey;
use crate::store::{Coordinator, Operation};
use crate::validation::{self, ValidationError};

const LOAD_GIGS: Operation = Operation::new(LoaderKey::Gigs, "Could not load gigs");
const ACCEPT_GIG: Operation = Operation::new(LoaderKey::Gigs, "Could not accept gig");
const REJECT_GIG: Operation = Operation::new(LoaderKey::Gigs, "Could not reject gig");
const SUBMIT_REPORT: Operation = Operation::new(LoaderKey::Inspection, "Could not submit report");

/// Mechanic thunks. These drive the ACCEPTED, REJECTED and COMPLETED
/// transitions that buyers only observe by re-fetching.
#[derive(Clone)]
pub struct MechanicFlows {
    coordinator: Coordinator,
    service: MechanicService,
}

impl MechanicFlows {
    pub fn new(coordinator: Coordinator, service: MechanicService) -> Self {
        Self {
            coordinator,
            service,
        }
    }

    pub async fn refresh_available(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let gigs = self
            .coordinator
            .run(LOAD_GIGS, self.service.available())
            .await?;
        self.coordinator
            .dispatch(MechanicIntent::AvailableLoaded { revision, gigs });
        Ok(())
    }

    pub async fn refresh_assigned(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let gigs = self
            .coordinator
            .run(LOAD_GIGS, self.service.assigned())
            .await?;
        self.coordinator
            .dispatch(MechanicIntent::AssignedLoaded { revision, gigs });
        Ok(())
    }

    /// Accept-then-refresh. A gig another mechanic took first comes back
    /// as a conflict and is shown as such.
    pub async fn accept(&self, inspection_id: &str) -> Result<Inspection, FlowError> {
        validation::required("Gig", inspection_id)?;

        let gig = self
            .coordinator
            .run(ACCEPT_GIG, self.service.accept(inspection_id))
            .await?;
        tracing::info!(inspection_id, "Gig accepted");
        self.coordinator.notify_success(
            "Gig accepted",
            format!(
                "Inspection #{} is scheduled for {}.",
                short_id(&gig.id),
                gig.scheduled_date
            ),
        );
        self.refetch_boards().await;
        Ok(gig)
    }

    pub async fn reject(&self, inspection_id: &str) -> Result<Inspection, FlowError> {
        validation::required("Gig", inspection_id)?;

        let gig = self
            .coordinator
            .run(REJECT_GIG, self.service.reject(inspection_id))
            .await?;
        tracing::info!(inspection_id, "Gig rejected");
        self.refetch_boards().await;
        Ok(gig)
    }

    pub async fn submit_report(
        &self,
        inspection_id: &str,
        report: &InspectionReport,
    ) -> Result<Inspection, FlowError> {
        validation::report(report)?;
        let status = self
            .coordinator
            .read(|state| state.mechanic.gig(inspection_id).map(|gig| gig.status))
            .ok_or_else(|| ValidationError::UnknownEntity {
                entity: "gig",
                id: inspection_id.to_string(),
            })?;
        if status.is_terminal() {
            return Err(ValidationError::AlreadyTerminal {
                entity: "gig",
                status: status.to_string(),
            }
            .into());
        }

        let gig = self
            .coordinator
            .run(SUBMIT_REPORT, self.service.submit_report(inspection_id, report))
            .await?;
        tracing::info!(inspection_id, rating = report.rating, "Inspection report submitted");
        self.coordinator
            .dispatch(MechanicIntent::GigUpdated(gig.clone()));
        self.coordinator.notify_success(
            "Report submitted",
            format!("Inspection #{} is complete.", short_id(&gig.id)),
        );
        Ok(gig)
    }

    async fn refetch_boards(&self) {
        if let Err(err) = self.refresh_available().await {
            tracing::debug!(error = %err, "Available gigs refetch failed");
        }
        if let Err(err) = self.refresh_assigned().await {
            tracing::debug!(error = %err, "Assigned gigs refetch failed");
        }
    }
}
