use serde::{Deserialize, Serialize};

/// A product that can be loaded into vending machines.
///
/// Products are seeded once at startup and never created, updated or
/// deleted through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Identity comparison: products are keyed by id alone.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Response payload projection. `id` is intentionally absent; handlers
    /// re-add it next to this projection.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "price": self.price,
        })
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Product {}: {}>", self.id, self.name)
    }
}
