use vmms_core::ServiceError;
use vmms_sql::{Row, Value};

use super::VendingService;
use crate::model::VendingMachine;

impl VendingService {
    /// List all vending machines, in store order.
    pub fn list_machines(&self) -> Result<Vec<VendingMachine>, ServiceError> {
        let rows = self
            .db()
            .query("SELECT id, name, location FROM vending_machines", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_machine).collect()
    }

    /// Get a vending machine by id.
    pub fn get_machine(&self, vm_id: i64) -> Result<VendingMachine, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT id, name, location FROM vending_machines WHERE id = ?1",
                &[Value::Integer(vm_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("vending machine {vm_id}")))?;

        row_to_machine(row)
    }

    /// Insert a new vending machine; its id comes back from the store.
    pub fn add_machine(&self, name: &str, location: &str) -> Result<VendingMachine, ServiceError> {
        let id = self
            .db()
            .insert(
                "INSERT INTO vending_machines (name, location) VALUES (?1, ?2)",
                &[Value::Text(name.to_string()), Value::Text(location.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(VendingMachine {
            id,
            name: name.to_string(),
            location: location.to_string(),
        })
    }

    /// Update a machine's name and location in place.
    pub fn update_machine(
        &self,
        vm_id: i64,
        name: &str,
        location: &str,
    ) -> Result<VendingMachine, ServiceError> {
        let affected = self
            .db()
            .exec(
                "UPDATE vending_machines SET name = ?1, location = ?2 WHERE id = ?3",
                &[
                    Value::Text(name.to_string()),
                    Value::Text(location.to_string()),
                    Value::Integer(vm_id),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("vending machine {vm_id}")));
        }

        Ok(VendingMachine {
            id: vm_id,
            name: name.to_string(),
            location: location.to_string(),
        })
    }

    /// Delete a machine and its current stock rows.
    ///
    /// Historical stock records keep referencing the deleted vm_id.
    pub fn delete_machine(&self, vm_id: i64) -> Result<(), ServiceError> {
        let affected = self
            .db()
            .exec(
                "DELETE FROM vending_machines WHERE id = ?1",
                &[Value::Integer(vm_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("vending machine {vm_id}")));
        }

        self.db()
            .exec("DELETE FROM stocks WHERE vm_id = ?1", &[Value::Integer(vm_id)])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(())
    }
}

fn row_to_machine(row: &Row) -> Result<VendingMachine, ServiceError> {
    Ok(VendingMachine {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Internal("vending machine row missing id".into()))?,
        name: row.get_str("name").unwrap_or_default().to_string(),
        location: row.get_str("location").unwrap_or_default().to_string(),
    })
}
