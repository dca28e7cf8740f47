use serde::{Deserialize, Serialize};

/// A vending machine and where it stands.
///
/// `id` is assigned by the store on insert; `name` and `location` are the
/// only mutable attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendingMachine {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl VendingMachine {
    /// Identity comparison: two values denote the same machine iff their ids
    /// match, regardless of name or location. Structural equality stays with
    /// the derived `PartialEq`.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Response payload projection. `id` is intentionally absent; handlers
    /// re-add it next to this projection.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "location": self.location,
        })
    }
}

impl std::fmt::Display for VendingMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<VendingMachine {}: {}>", self.id, self.name)
    }
}
