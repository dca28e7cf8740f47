use serde::{Deserialize, Serialize};

/// An immutable, timestamped copy of a [`super::Stock`] row.
///
/// Records are written in bulk by the snapshot operation, one per current
/// stock row, all sharing a single RFC 3339 timestamp. They are never
/// updated or deleted, and they outlive the machine they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub time_stamp: String,
    pub vm_id: i64,
    pub prod_id: i64,
    pub stock: i64,
}

impl StockRecord {
    /// Identity comparison: (time_stamp, vm_id, prod_id). The recorded
    /// quantity deliberately does not participate.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.time_stamp == other.time_stamp
            && self.vm_id == other.vm_id
            && self.prod_id == other.prod_id
    }

    /// Response payload projection. All fields participate.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "time_stamp": self.time_stamp,
            "vm_id": self.vm_id,
            "prod_id": self.prod_id,
            "stock": self.stock,
        })
    }
}

impl std::fmt::Display for StockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<StockRecord ({}, {}, {}): {}>",
            self.time_stamp, self.vm_id, self.prod_id, self.stock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StockRecord {
        StockRecord {
            time_stamp: "2026-01-01T00:00:00+00:00".into(),
            vm_id: 2,
            prod_id: 2,
            stock: 200,
        }
    }

    #[test]
    fn display_repr() {
        assert_eq!(
            record().to_string(),
            "<StockRecord (2026-01-01T00:00:00+00:00, 2, 2): 200>"
        );
    }

    #[test]
    fn identity_ignores_recorded_quantity() {
        let a = record();
        let mut b = record();
        b.stock = 999;
        assert!(a.same_identity(&b));

        b.time_stamp = "2020-01-01T00:00:00+00:00".into();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn to_dict_round_trip() {
        let a = record();
        let dict = a.to_dict();
        let b = StockRecord {
            time_stamp: dict["time_stamp"].as_str().unwrap().to_string(),
            vm_id: dict["vm_id"].as_i64().unwrap(),
            prod_id: dict["prod_id"].as_i64().unwrap(),
            stock: dict["stock"].as_i64().unwrap(),
        };
        assert_eq!(a, b);
        assert_eq!(b.to_dict(), dict);
    }
}
