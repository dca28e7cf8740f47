use serde::{Deserialize, Serialize};

use super::Product;

/// How many units of a product are currently loaded in a machine.
///
/// Keyed by the (vm_id, prod_id) pair; `stock` is the only mutable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub vm_id: i64,
    pub prod_id: i64,
    pub stock: i64,
}

impl Stock {
    /// Identity comparison: the (vm_id, prod_id) pair, quantity excluded.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.vm_id == other.vm_id && self.prod_id == other.prod_id
    }

    /// Response payload projection. All fields participate.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "vm_id": self.vm_id,
            "prod_id": self.prod_id,
            "stock": self.stock,
        })
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Stock ({}, {}): {}>", self.vm_id, self.prod_id, self.stock)
    }
}

/// One row of the stocks x products join: a product together with its
/// quantity in a particular machine.
#[derive(Debug, Clone)]
pub struct StockLevel {
    pub product: Product,
    pub stock: i64,
}

impl StockLevel {
    /// Response payload projection: product fields inlined next to the
    /// quantity, keyed by product id.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.product.id,
            "name": self.product.name,
            "price": self.product.price,
            "stock": self.stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> Stock {
        Stock {
            vm_id: 2,
            prod_id: 2,
            stock: 200,
        }
    }

    #[test]
    fn display_repr() {
        assert_eq!(stock().to_string(), "<Stock (2, 2): 200>");
    }

    #[test]
    fn identity_ignores_quantity() {
        let a = stock();
        let mut b = stock();
        b.stock = 5;
        assert!(a.same_identity(&b));

        b.vm_id = 3;
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn to_dict_keeps_all_fields() {
        assert_eq!(
            stock().to_dict(),
            serde_json::json!({"vm_id": 2, "prod_id": 2, "stock": 200})
        );
    }

    #[test]
    fn level_to_dict_inlines_product() {
        let level = StockLevel {
            product: Product {
                id: 1,
                name: "taro".into(),
                price: 20.0,
            },
            stock: 100,
        };
        assert_eq!(
            level.to_dict(),
            serde_json::json!({"id": 1, "name": "taro", "price": 20.0, "stock": 100})
        );
    }
}
