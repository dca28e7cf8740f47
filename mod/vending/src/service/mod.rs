mod product;
mod schema;
mod stock;
mod stock_record;
mod vending_machine;

use std::sync::Arc;

use vmms_core::ServiceError;
use vmms_sql::SQLStore;

/// Data access for the vending module.
///
/// One impl block per resource (vending machines, products, stocks, stock
/// records), all running against the shared SQL store. Every operation is a
/// single statement or a short sequence of them; there is no transaction
/// management beyond what each statement gets on its own.
pub struct VendingService {
    db: Arc<dyn SQLStore>,
}

impl VendingService {
    /// Create the service and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        schema::init_schema(db.as_ref())?;
        Ok(Self { db })
    }

    /// Insert the fixed product catalogue. Idempotent: rows that already
    /// exist are skipped.
    pub fn seed_products(&self) -> Result<(), ServiceError> {
        schema::seed_products(self.db.as_ref())
    }

    pub(crate) fn db(&self) -> &dyn SQLStore {
        self.db.as_ref()
    }
}

#[cfg(test)]
pub(crate) fn test_service() -> VendingService {
    let db = Arc::new(vmms_sql::SqliteStore::open_in_memory().unwrap());
    let service = VendingService::new(db).unwrap();
    service.seed_products().unwrap();
    service
}
