use vmms_core::ServiceError;
use vmms_sql::{SQLStore, Value};

/// SQL DDL statements to initialize the vending database schema.
///
/// Machines take an auto-assigned rowid; stocks are keyed by the
/// (vm_id, prod_id) pair and stock records by that pair plus the snapshot
/// timestamp. Timestamps are RFC 3339 TEXT.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS vending_machines (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT NOT NULL,
        location  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id     INTEGER PRIMARY KEY,
        name   TEXT NOT NULL,
        price  REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS stocks (
        vm_id    INTEGER NOT NULL,
        prod_id  INTEGER NOT NULL,
        stock    INTEGER NOT NULL,
        PRIMARY KEY (vm_id, prod_id)
    )",
    "CREATE TABLE IF NOT EXISTS stock_records (
        time_stamp  TEXT    NOT NULL,
        vm_id       INTEGER NOT NULL,
        prod_id     INTEGER NOT NULL,
        stock       INTEGER NOT NULL,
        PRIMARY KEY (time_stamp, vm_id, prod_id)
    )",
    // Indexes for the timeline queries.
    "CREATE INDEX IF NOT EXISTS idx_rec_vm ON stock_records(vm_id)",
    "CREATE INDEX IF NOT EXISTS idx_rec_prod ON stock_records(prod_id)",
];

/// The product catalogue present in every installation.
const SEED_PRODUCTS: &[(i64, &str, f64)] = &[
    (1, "taro", 20.0),
    (2, "pringle", 30.0),
    (3, "lay's", 50.0),
];

pub fn init_schema(db: &dyn SQLStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        db.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init failed: {e}")))?;
    }
    Ok(())
}

/// Seed the fixed products. `INSERT OR IGNORE` swallows duplicate-key
/// conflicts, so running this on every startup is safe.
pub fn seed_products(db: &dyn SQLStore) -> Result<(), ServiceError> {
    for (id, name, price) in SEED_PRODUCTS {
        db.exec(
            "INSERT OR IGNORE INTO products (id, name, price) VALUES (?1, ?2, ?3)",
            &[
                Value::Integer(*id),
                Value::Text((*name).to_string()),
                Value::Real(*price),
            ],
        )
        .map_err(|e| ServiceError::Storage(format!("product seeding failed: {e}")))?;
    }
    Ok(())
}
