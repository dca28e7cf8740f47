pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use vmms_core::{Module, ServiceError};
use vmms_sql::SQLStore;

use service::VendingService;

/// The vending module: machines, products, current stocks, and the stock
/// record timeline.
pub struct VendingModule {
    service: Arc<VendingService>,
}

impl VendingModule {
    /// Create the module and initialise its tables.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        let service = Arc::new(VendingService::new(db)?);
        Ok(Self { service })
    }

    /// Seed the fixed product catalogue. Safe to call on every startup.
    pub fn seed_products(&self) -> Result<(), ServiceError> {
        self.service.seed_products()
    }

    /// Get a reference to the service for programmatic access.
    pub fn service(&self) -> &Arc<VendingService> {
        &self.service
    }
}

impl Module for VendingModule {
    fn name(&self) -> &str {
        // Mounted under /{name} by the binary; "api" keeps the public paths
        // identical to the historical frontend contract.
        "api"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
