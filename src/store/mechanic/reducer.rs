use crate::model::Inspection;
use crate::store::mvi::Reducer;

use super::intent::MechanicIntent;
use super::state::MechanicSliceState;

pub struct MechanicReducer;

impl Reducer for MechanicReducer {
    type State = MechanicSliceState;
    type Intent = MechanicIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MechanicIntent::AvailableLoaded { revision, gigs } => {
                state.available.apply(revision, gigs);
            }
            MechanicIntent::AssignedLoaded { revision, gigs } => {
                state.assigned.apply(revision, gigs);
            }
            MechanicIntent::GigUpdated(updated) => {
                state.available.modify(|gigs| flip_status(gigs, &updated));
                state.assigned.modify(|gigs| flip_status(gigs, &updated));
            }
        }
        state
    }
}

fn flip_status(gigs: &mut [Inspection], updated: &Inspection) {
    if let Some(gig) = gigs.iter_mut().find(|gig| gig.id == updated.id) {
        gig.status = updated.status;
        gig.report_data = updated.report_data.clone();
    }
}
