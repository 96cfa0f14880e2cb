use crate::model::Inspection;
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MechanicIntent {
    AvailableLoaded { revision: u64, gigs: Vec<Inspection> },

    AssignedLoaded { revision: u64, gigs: Vec<Inspection> },

    GigUpdated(Inspection),
}

impl Intent for MechanicIntent {}
