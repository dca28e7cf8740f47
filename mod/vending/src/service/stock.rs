use vmms_core::ServiceError;
use vmms_sql::{Row, Value};

use super::VendingService;
use crate::model::{Product, Stock, StockLevel};

impl VendingService {
    /// Get the stock row for a (machine, product) pair.
    pub fn get_stock(&self, vm_id: i64, prod_id: i64) -> Result<Stock, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT vm_id, prod_id, stock FROM stocks WHERE vm_id = ?1 AND prod_id = ?2",
                &[Value::Integer(vm_id), Value::Integer(prod_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows.first().ok_or_else(|| {
            ServiceError::NotFound(format!(
                "product {prod_id} stock in vending machine {vm_id}"
            ))
        })?;

        row_to_stock(row)
    }

    /// Product stocks of one machine: the stocks x products join, one row
    /// per loaded product.
    pub fn stocks_by_machine(&self, vm_id: i64) -> Result<Vec<StockLevel>, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT s.prod_id, p.name, p.price, s.stock \
                 FROM stocks s LEFT JOIN products p ON p.id = s.prod_id \
                 WHERE s.vm_id = ?1",
                &[Value::Integer(vm_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(StockLevel {
                    product: Product {
                        id: row.get_i64("prod_id").ok_or_else(|| {
                            ServiceError::Internal("stock row missing prod_id".into())
                        })?,
                        name: row.get_str("name").unwrap_or_default().to_string(),
                        price: row.get_f64("price").unwrap_or_default(),
                    },
                    stock: row.get_i64("stock").unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Load a product into a machine.
    pub fn add_stock(&self, vm_id: i64, prod_id: i64, stock: i64) -> Result<Stock, ServiceError> {
        self.db()
            .exec(
                "INSERT INTO stocks (vm_id, prod_id, stock) VALUES (?1, ?2, ?3)",
                &[
                    Value::Integer(vm_id),
                    Value::Integer(prod_id),
                    Value::Integer(stock),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint failed") {
                    ServiceError::Conflict(format!(
                        "product {prod_id} is already stocked in vending machine {vm_id}"
                    ))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;

        Ok(Stock {
            vm_id,
            prod_id,
            stock,
        })
    }

    /// Replace the quantity of an existing stock row.
    pub fn update_stock(
        &self,
        vm_id: i64,
        prod_id: i64,
        stock: i64,
    ) -> Result<Stock, ServiceError> {
        let affected = self
            .db()
            .exec(
                "UPDATE stocks SET stock = ?1 WHERE vm_id = ?2 AND prod_id = ?3",
                &[
                    Value::Integer(stock),
                    Value::Integer(vm_id),
                    Value::Integer(prod_id),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "product {prod_id} stock in vending machine {vm_id}"
            )));
        }

        Ok(Stock {
            vm_id,
            prod_id,
            stock,
        })
    }

    /// Remove a product from a machine.
    pub fn delete_stock(&self, vm_id: i64, prod_id: i64) -> Result<(), ServiceError> {
        let affected = self
            .db()
            .exec(
                "DELETE FROM stocks WHERE vm_id = ?1 AND prod_id = ?2",
                &[Value::Integer(vm_id), Value::Integer(prod_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "product {prod_id} stock in vending machine {vm_id}"
            )));
        }

        Ok(())
    }
}

fn row_to_stock(row: &Row) -> Result<Stock, ServiceError> {
    Ok(Stock {
        vm_id: row
            .get_i64("vm_id")
            .ok_or_else(|| ServiceError::Internal("stock row missing vm_id".into()))?,
        prod_id: row
            .get_i64("prod_id")
            .ok_or_else(|| ServiceError::Internal("stock row missing prod_id".into()))?,
        stock: row.get_i64("stock").unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_service;
    use vmms_core::ServiceError;

    #[test]
    fn add_then_get() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        let stock = service.add_stock(machine.id, 1, 100).unwrap();
        assert_eq!(stock.stock, 100);

        let fetched = service.get_stock(machine.id, 1).unwrap();
        assert!(fetched.same_identity(&stock));
        assert_eq!(fetched.stock, 100);
    }

    #[test]
    fn double_add_is_a_conflict() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        service.add_stock(machine.id, 1, 100).unwrap();
        assert!(matches!(
            service.add_stock(machine.id, 1, 50),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn update_replaces_quantity() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        service.add_stock(machine.id, 1, 100).unwrap();

        service.update_stock(machine.id, 1, 42).unwrap();
        assert_eq!(service.get_stock(machine.id, 1).unwrap().stock, 42);
    }

    #[test]
    fn delete_removes_row() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        service.add_stock(machine.id, 1, 100).unwrap();

        service.delete_stock(machine.id, 1).unwrap();
        assert!(matches!(
            service.get_stock(machine.id, 1),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_stock(machine.id, 1),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn stocks_by_machine_joins_products() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        service.add_stock(machine.id, 1, 100).unwrap();
        service.add_stock(machine.id, 3, 7).unwrap();

        let levels = service.stocks_by_machine(machine.id).unwrap();
        assert_eq!(levels.len(), 2);

        let taro = levels.iter().find(|l| l.product.id == 1).unwrap();
        assert_eq!(taro.product.name, "taro");
        assert_eq!(taro.product.price, 20.0);
        assert_eq!(taro.stock, 100);

        // Another machine's stocks do not leak in.
        let other = service.add_machine("vm_002", "loc_002").unwrap();
        assert!(service.stocks_by_machine(other.id).unwrap().is_empty());
    }
}
