use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};

use vmms_core::{Envelope, ServiceError};

use crate::model::StockRecord;
use crate::service::VendingService;

type Service = Arc<VendingService>;

pub fn router(service: Service) -> Router {
    Router::new()
        .route("/stock_records", get(list_records))
        .route(
            "/stock_records/timeline/vending_machines/{vm_id}",
            get(machine_timeline),
        )
        .route(
            "/stock_records/timeline/products/{prod_id}",
            get(product_timeline),
        )
        .route("/stock_records/save", post(save_records))
        .with_state(service)
}

fn records_payload(records: &[StockRecord]) -> serde_json::Value {
    records
        .iter()
        .map(|record| record.to_dict())
        .collect::<Vec<_>>()
        .into()
}

// ---------------------------------------------------------------------------
// GET /stock_records
// ---------------------------------------------------------------------------

async fn list_records(State(service): State<Service>) -> Result<Envelope, ServiceError> {
    let records = service.list_records()?;
    Ok(Envelope::get(
        records_payload(&records),
        "all stock records are successfully retrieved",
    ))
}

// ---------------------------------------------------------------------------
// GET /stock_records/timeline/vending_machines/:vm_id
// ---------------------------------------------------------------------------

async fn machine_timeline(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let records = service.records_by_machine(vm_id)?;
    Ok(Envelope::get(
        records_payload(&records),
        format!("all stock records of vending machine {vm_id} are successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// GET /stock_records/timeline/products/:prod_id
// ---------------------------------------------------------------------------

async fn product_timeline(
    State(service): State<Service>,
    Path(prod_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let records = service.records_by_product(prod_id)?;
    Ok(Envelope::get(
        records_payload(&records),
        format!("all stock records of product {prod_id} are successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// POST /stock_records/save
// ---------------------------------------------------------------------------

async fn save_records(State(service): State<Service>) -> Result<Envelope, ServiceError> {
    let records = service.save_records()?;
    Ok(Envelope::post(
        records_payload(&records),
        "current stocks are successfully recorded",
    ))
}
