use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use vmms_core::{Envelope, ServiceError, with_id};

use crate::model::VendingMachine;
use crate::service::VendingService;

type Service = Arc<VendingService>;

/// Form body for machine create and update.
#[derive(Debug, Deserialize)]
struct MachineForm {
    name: String,
    location: String,
}

pub fn router(service: Service) -> Router {
    Router::new()
        .route("/vending_machines", get(list_machines))
        .route("/vending_machines/{id}", get(get_machine))
        .route("/vending_machines/add", post(add_machine))
        .route("/vending_machines/update/{id}", post(update_machine))
        .route("/vending_machines/delete/{id}", post(delete_machine))
        .with_state(service)
}

fn machine_payload(machine: &VendingMachine) -> serde_json::Value {
    with_id(machine.id, machine.to_dict())
}

// ---------------------------------------------------------------------------
// GET /vending_machines
// ---------------------------------------------------------------------------

async fn list_machines(State(service): State<Service>) -> Result<Envelope, ServiceError> {
    let machines = service.list_machines()?;
    let payload: Vec<_> = machines.iter().map(machine_payload).collect();
    Ok(Envelope::get(
        payload.into(),
        "all vending machines are successfully retrieved",
    ))
}

// ---------------------------------------------------------------------------
// GET /vending_machines/:id
// ---------------------------------------------------------------------------

async fn get_machine(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    let machine = service.get_machine(vm_id)?;
    Ok(Envelope::get(
        machine_payload(&machine),
        format!("vending machine {vm_id} is successfully retrieved"),
    ))
}

// ---------------------------------------------------------------------------
// POST /vending_machines/add
// ---------------------------------------------------------------------------

async fn add_machine(
    State(service): State<Service>,
    Form(form): Form<MachineForm>,
) -> Result<Envelope, ServiceError> {
    let machine = service.add_machine(&form.name, &form.location)?;
    Ok(Envelope::post(
        machine_payload(&machine),
        format!("vending machine {} is successfully added", machine.id),
    ))
}

// ---------------------------------------------------------------------------
// POST /vending_machines/update/:id
// ---------------------------------------------------------------------------

async fn update_machine(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
    Form(form): Form<MachineForm>,
) -> Result<Envelope, ServiceError> {
    let machine = service.update_machine(vm_id, &form.name, &form.location)?;
    Ok(Envelope::post(
        machine_payload(&machine),
        format!("vending machine {} is successfully updated", machine.id),
    ))
}

// ---------------------------------------------------------------------------
// POST /vending_machines/delete/:id
// ---------------------------------------------------------------------------

async fn delete_machine(
    State(service): State<Service>,
    Path(vm_id): Path<i64>,
) -> Result<Envelope, ServiceError> {
    service.delete_machine(vm_id)?;
    Ok(Envelope::deleted(format!(
        "vending machine {vm_id} is successfully deleted"
    )))
}
