use vmms_core::ServiceError;
use vmms_sql::{Row, Value};

use super::VendingService;
use crate::model::Product;

impl VendingService {
    /// List all products, in store order.
    pub fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = self
            .db()
            .query("SELECT id, name, price FROM products", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_product).collect()
    }

    /// Get a product by id.
    pub fn get_product(&self, prod_id: i64) -> Result<Product, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT id, name, price FROM products WHERE id = ?1",
                &[Value::Integer(prod_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("product {prod_id}")))?;

        row_to_product(row)
    }

    /// Products that can still be added to a machine: the full catalogue
    /// minus the ones that already have a stock row there.
    pub fn product_choices(&self, vm_id: i64) -> Result<Vec<Product>, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT id, name, price FROM products \
                 WHERE id NOT IN (SELECT prod_id FROM stocks WHERE vm_id = ?1)",
                &[Value::Integer(vm_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_product).collect()
    }
}

fn row_to_product(row: &Row) -> Result<Product, ServiceError> {
    Ok(Product {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Internal("product row missing id".into()))?,
        name: row.get_str("name").unwrap_or_default().to_string(),
        price: row.get_f64("price").unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_service;
    use vmms_core::ServiceError;

    #[test]
    fn seeded_catalogue() {
        let service = test_service();
        let products = service.list_products().unwrap();
        assert_eq!(products.len(), 3);

        let taro = service.get_product(1).unwrap();
        assert_eq!(taro.name, "taro");
        assert_eq!(taro.price, 20.0);
        assert_eq!(service.get_product(3).unwrap().name, "lay's");
    }

    #[test]
    fn seeding_is_idempotent() {
        let service = test_service();
        service.seed_products().unwrap();
        service.seed_products().unwrap();
        assert_eq!(service.list_products().unwrap().len(), 3);
    }

    #[test]
    fn missing_product_is_not_found() {
        let service = test_service();
        assert!(matches!(service.get_product(99), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn choices_exclude_stocked_products() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();

        // Nothing stocked yet: every seeded product is a choice.
        assert_eq!(service.product_choices(machine.id).unwrap().len(), 3);

        service.add_stock(machine.id, 2, 10).unwrap();
        let choices = service.product_choices(machine.id).unwrap();
        let ids: Vec<i64> = choices.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Stocking in another machine does not affect this one.
        let other = service.add_machine("vm_002", "loc_002").unwrap();
        service.add_stock(other.id, 1, 10).unwrap();
        assert_eq!(service.product_choices(machine.id).unwrap().len(), 2);
    }
}
