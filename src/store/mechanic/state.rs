use crate::model::Inspection;
use crate::store::mvi::SliceState;
use crate::store::revision::Synced;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MechanicSliceState {
    pub available: Synced<Vec<Inspection>>,
    pub assigned: Synced<Vec<Inspection>>,
}

impl SliceState for MechanicSliceState {}

impl MechanicSliceState {
    pub fn cleared(floor: u64) -> Self {
        Self {
            available: Synced::cleared(floor),
            assigned: Synced::cleared(floor),
        }
    }

    pub fn gig(&self, inspection_id: &str) -> Option<&Inspection> {
        self.assigned
            .get()
            .iter()
            .chain(self.available.get().iter())
            .find(|gig| gig.id == inspection_id)
    }
}
