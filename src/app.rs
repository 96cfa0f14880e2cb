//! Wires configuration, the API client, services, the store and flows.

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, SessionStore};
use crate::error::FlowError;
use crate::flows::{AuthFlows, BuyerFlows, Collection, MechanicFlows, SellerFlows};
use crate::services::{AuthService, BuyerService, MechanicService, SellerService};
use crate::store::Coordinator;

pub struct App {
    pub coordinator: Coordinator,
    pub auth: AuthFlows,
    pub buyer: BuyerFlows,
    pub seller: SellerFlows,
    pub mechanic: MechanicFlows,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        tracing::debug!(base_url = api.base_url(), "API client ready");
        let session = SessionStore::new(config.session_path());
        let coordinator = Coordinator::new(Some(session.clone()));

        Ok(Self {
            auth: AuthFlows::new(
                coordinator.clone(),
                AuthService::new(api.clone()),
                api.clone(),
                session,
            ),
            buyer: BuyerFlows::new(
                coordinator.clone(),
                BuyerService::new(api.clone()),
                config.marketplace.clone(),
            ),
            seller: SellerFlows::new(coordinator.clone(), SellerService::new(api.clone())),
            mechanic: MechanicFlows::new(coordinator.clone(), MechanicService::new(api)),
            coordinator,
        })
    }

    /// Re-fetches one server-owned collection.
    pub async fn invalidate(&self, collection: Collection) -> Result<(), FlowError> {
        match collection {
            Collection::Cart => self.buyer.refresh_cart().await,
            Collection::Orders => self.buyer.refresh_orders().await,
            Collection::Inspections => self.buyer.refresh_inspections().await,
            Collection::SellerProducts => self.seller.refresh_products().await,
            Collection::SellerOrders => self.seller.refresh_orders().await,
            Collection::AvailableGigs => self.mechanic.refresh_available().await,
            Collection::AssignedGigs => self.mechanic.refresh_assigned().await,
        }
    }
}
