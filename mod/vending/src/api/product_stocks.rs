use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use vmms_core::{Envelope, ServiceError};

use crate::service::VendingService;

type Service = Arc<VendingService>;

/// Form body for stock create and update.
///
/// `prod_id` is optional here because the `/{vm_id}/{prod_id}` route
/// variants carry it in the path instead; the path value wins when both
/// are present.
#[derive(Debug, Deserialize)]
struct StockForm {
    #[serde(default)]
    prod_id: Option<i64>,
    stock: i64,
}

impl StockForm {
    fn require_prod_id(&self) -> Result<i64, ServiceError> {
        self.prod_id
            .ok_or_else(|| ServiceError::Validation("prod_id is required".into()))
    }
}

pub fn router(service: Service) -> Router {
    Router::new()
        .route("/product_stocks/{vm_id}", get(get_stocks))
        .route("/product_stocks/{vm_id}/{prod_id}", get(get_stock))
        .route("/product_stocks/add/{vm_id}", post(add_stock))
        .route("/product_stocks/add/{vm_id}/{prod_id}", post(add_stock_for_product))
        .route("/product_stocks/update/{vm_id}", post(update_stock))
        .route(
            "/product_stocks/update/{vm_id}/{prod_id}",
            post(update_stock_for_product),
        )
        .route("/product_stocks/delete/{vm_id}/{prod_id}", post(delete_stock))
        .with_state(service)
}

// ---------------------------------------------------------------------------
// GET /product_stocks/:vm_id
// ---------------------------------------------------------------------------

async fn get_stocks(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let levels = service.stocks_by_machine(vm_id)?;
    let payload: Vec<_> = levels.iter().map(|level| level.to_dict()).collect();
    Ok(Envelope::get(
        payload.into(),
        format!("product stocks of vending machine {vm_id} are successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// GET /product_stocks/:vm_id/:prod_id
// ---------------------------------------------------------------------------

async fn get_stock(
    State(service): State<Service>,
    Path((vm_id, prod_id)): Path<(i64, i64)>,
) -> Result<Envelope, ServiceError> {
    let stock = service.get_stock(vm_id, prod_id)?;
    Ok(Envelope::get(
        stock.to_dict(),
        format!("product {prod_id} stock in vending machine {vm_id} is successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// POST /product_stocks/add/:vm_id[/:prod_id]
// ---------------------------------------------------------------------------

async fn add_stock(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Envelope, ServiceError> {
    let prod_id = form.require_prod_id()?;
    create_stock(&service, vm_id, prod_id, form.stock)
}

async fn add_stock_for_product(
    State(service): State<Service>,
    Path((vm_id, prod_id)): Path<(i64, i64)>,
    Form(form): Form<StockForm>,
) -> Result<Envelope, ServiceError> {
    create_stock(&service, vm_id, prod_id, form.stock)
}

fn create_stock(
    service: &VendingService,
    vm_id: i64,
    prod_id: i64,
    quantity: i64,
) -> Result<Envelope, ServiceError> {
    let stock = service.add_stock(vm_id, prod_id, quantity)?;
    Ok(Envelope::post(
        stock.to_dict(),
        format!(
            "new product stock is successfully added to vending machine {}",
            stock.vm_id
        ),
    ))
}

// ---------------------------------------------------------------------------
// POST /product_stocks/update/:vm_id[/:prod_id]
// ---------------------------------------------------------------------------

async fn update_stock(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Envelope, ServiceError> {
    let prod_id = form.require_prod_id()?;
    modify_stock(&service, vm_id, prod_id, form.stock)
}

async fn update_stock_for_product(
    State(service): State<Service>,
    Path((vm_id, prod_id)): Path<(i64, i64)>,
    Form(form): Form<StockForm>,
) -> Result<Envelope, ServiceError> {
    modify_stock(&service, vm_id, prod_id, form.stock)
}

fn modify_stock(
    service: &VendingService,
    vm_id: i64,
    prod_id: i64,
    quantity: i64,
) -> Result<Envelope, ServiceError> {
    let stock = service.update_stock(vm_id, prod_id, quantity)?;
    Ok(Envelope::post(
        stock.to_dict(),
        format!(
            "product {} stock is successfully updated in vending machine {}",
            stock.prod_id, stock.vm_id
        ),
    ))
}

// ---------------------------------------------------------------------------
// POST /product_stocks/delete/:vm_id/:prod_id
// ---------------------------------------------------------------------------

async fn delete_stock(
    State(service): State<Service>,
    Path((vm_id, prod_id)): Path<(i64, i64)>,
) -> Result<Envelope, ServiceError> {
    service.delete_stock(vm_id, prod_id)?;
    Ok(Envelope::deleted(format!(
        "product {prod_id} is successfully deleted from vending machine {vm_id}"
    )))
}
