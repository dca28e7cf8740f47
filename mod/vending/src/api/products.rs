use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;

use vmms_core::{Envelope, ServiceError, with_id};

use crate::model::Product;
use crate::service::VendingService;

type Service = Arc<VendingService>;

pub fn router(service: Service) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/products/choices/{vm_id}", get(product_choices))
        .with_state(service)
}

fn product_payload(product: &Product) -> serde_json::Value {
    with_id(product.id, product.to_dict())
}

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

async fn list_products(State(service): State<Service>) -> Result<Envelope, ServiceError> {
    let products = service.list_products()?;
    let payload: Vec<_> = products.iter().map(product_payload).collect();
    Ok(Envelope::get(
        payload.into(),
        "all products are successfully retrieved",
    ))
}

// ---------------------------------------------------------------------------
// GET /products/:id
// ---------------------------------------------------------------------------

async fn get_product(
    State(service): State<Service>,
    Path(prod_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let product = service.get_product(prod_id)?;
    Ok(Envelope::get(
        product_payload(&product),
        format!("product {prod_id} is successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// GET /products/choices/:vm_id
// ---------------------------------------------------------------------------

async fn product_choices(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let choices = service.product_choices(vm_id)?;
    let payload: Vec<_> = choices.iter().map(product_payload).collect();
    Ok(Envelope::get(
        payload.into(),
        format!("product choices of vending machine {vm_id} are successfully retrieved"),
    ))
}
