mod product_stocks;
mod products;
mod stock_records;
mod vending_machines;

use std::sync::Arc;

use axum::Router;

use crate::service::VendingService;

/// Build the complete vending API router.
///
/// Routes (mounted under the module prefix by the binary):
/// - `GET  /vending_machines`                  — list machines
/// - `GET  /vending_machines/{id}`             — get machine
/// - `POST /vending_machines/add`              — add machine
/// - `POST /vending_machines/update/{id}`      — update machine
/// - `POST /vending_machines/delete/{id}`      — delete machine
/// - `GET  /products`                          — list products
/// - `GET  /products/{id}`                     — get product
/// - `GET  /products/choices/{vm_id}`          — products not yet stocked in a machine
/// - `GET  /product_stocks/{vm_id}`            — stocks of a machine
/// - `GET  /product_stocks/{vm_id}/{prod_id}`  — one stock row
/// - `POST /product_stocks/add/{vm_id}[/{prod_id}]`    — add stock
/// - `POST /product_stocks/update/{vm_id}[/{prod_id}]` — update stock
/// - `POST /product_stocks/delete/{vm_id}/{prod_id}`   — delete stock
/// - `GET  /stock_records`                     — list all records
/// - `GET  /stock_records/timeline/vending_machines/{vm_id}` — machine timeline
/// - `GET  /stock_records/timeline/products/{prod_id}`       — product timeline
/// - `POST /stock_records/save`                — snapshot current stocks
pub fn router(service: Arc<VendingService>) -> Router {
    Router::new()
        .merge(vending_machines::router(Arc::clone(&service)))
        .merge(products::router(Arc::clone(&service)))
        .merge(product_stocks::router(Arc::clone(&service)))
        .merge(stock_records::router(service))
}
