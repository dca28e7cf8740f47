use tracing::info;
use vmms_core::{ServiceError, now_rfc3339};
use vmms_sql::{Row, Value};

use super::VendingService;
use crate::model::StockRecord;

impl VendingService {
    /// List every stock record ever taken, in store order.
    pub fn list_records(&self) -> Result<Vec<StockRecord>, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT time_stamp, vm_id, prod_id, stock FROM stock_records",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Timeline of one machine: every record with its vm_id.
    pub fn records_by_machine(&self, vm_id: i64) -> Result<Vec<StockRecord>, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT time_stamp, vm_id, prod_id, stock FROM stock_records WHERE vm_id = ?1",
                &[Value::Integer(vm_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Timeline of one product across all machines.
    pub fn records_by_product(&self, prod_id: i64) -> Result<Vec<StockRecord>, ServiceError> {
        let rows = self
            .db()
            .query(
                "SELECT time_stamp, vm_id, prod_id, stock FROM stock_records WHERE prod_id = ?1",
                &[Value::Integer(prod_id)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Snapshot the current stocks into the timeline.
    ///
    /// Every current stock row becomes one record; the whole snapshot shares
    /// a single timestamp taken once at the start.
    pub fn save_records(&self) -> Result<Vec<StockRecord>, ServiceError> {
        let rows = self
            .db()
            .query("SELECT vm_id, prod_id, stock FROM stocks", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let time_stamp = now_rfc3339();
        let mut records = Vec::with_capacity(rows.len());

        for row in &rows {
            let record = StockRecord {
                time_stamp: time_stamp.clone(),
                vm_id: row
                    .get_i64("vm_id")
                    .ok_or_else(|| ServiceError::Internal("stock row missing vm_id".into()))?,
                prod_id: row
                    .get_i64("prod_id")
                    .ok_or_else(|| ServiceError::Internal("stock row missing prod_id".into()))?,
                stock: row.get_i64("stock").unwrap_or_default(),
            };

            self.db()
                .exec(
                    "INSERT INTO stock_records (time_stamp, vm_id, prod_id, stock) \
                     VALUES (?1, ?2, ?3, ?4)",
                    &[
                        Value::Text(record.time_stamp.clone()),
                        Value::Integer(record.vm_id),
                        Value::Integer(record.prod_id),
                        Value::Integer(record.stock),
                    ],
                )
                .map_err(|e| ServiceError::Storage(e.to_string()))?;

            records.push(record);
        }

        info!("recorded {} stock rows at {}", records.len(), time_stamp);
        Ok(records)
    }
}

fn row_to_record(row: &Row) -> Result<StockRecord, ServiceError> {
    Ok(StockRecord {
        time_stamp: row
            .get_str("time_stamp")
            .ok_or_else(|| ServiceError::Internal("stock record row missing time_stamp".into()))?
            .to_string(),
        vm_id: row
            .get_i64("vm_id")
            .ok_or_else(|| ServiceError::Internal("stock record row missing vm_id".into()))?,
        prod_id: row
            .get_i64("prod_id")
            .ok_or_else(|| ServiceError::Internal("stock record row missing prod_id".into()))?,
        stock: row.get_i64("stock").unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_service;

    #[test]
    fn snapshot_copies_every_stock_row_under_one_timestamp() {
        let service = test_service();
        let a = service.add_machine("vm_001", "loc_001").unwrap();
        let b = service.add_machine("vm_002", "loc_002").unwrap();
        service.add_stock(a.id, 1, 100).unwrap();
        service.add_stock(a.id, 2, 200).unwrap();
        service.add_stock(b.id, 3, 300).unwrap();

        let records = service.save_records().unwrap();
        assert_eq!(records.len(), 3);

        let ts = &records[0].time_stamp;
        assert!(records.iter().all(|r| &r.time_stamp == ts));

        let for_a = records.iter().find(|r| r.vm_id == a.id && r.prod_id == 2).unwrap();
        assert_eq!(for_a.stock, 200);
    }

    #[test]
    fn snapshot_of_empty_stocks_is_empty() {
        let service = test_service();
        assert!(service.save_records().unwrap().is_empty());
        assert!(service.list_records().unwrap().is_empty());
    }

    #[test]
    fn timelines_filter_by_machine_and_product() {
        let service = test_service();
        let a = service.add_machine("vm_001", "loc_001").unwrap();
        let b = service.add_machine("vm_002", "loc_002").unwrap();
        service.add_stock(a.id, 1, 100).unwrap();
        service.add_stock(b.id, 1, 50).unwrap();
        service.add_stock(b.id, 2, 60).unwrap();

        service.save_records().unwrap();
        service.update_stock(a.id, 1, 90).unwrap();
        service.save_records().unwrap();

        assert_eq!(service.list_records().unwrap().len(), 6);
        assert_eq!(service.records_by_machine(a.id).unwrap().len(), 2);
        assert_eq!(service.records_by_machine(b.id).unwrap().len(), 4);
        assert_eq!(service.records_by_product(1).unwrap().len(), 4);
        assert_eq!(service.records_by_product(2).unwrap().len(), 2);
        assert!(service.records_by_product(3).unwrap().is_empty());
    }

    #[test]
    fn records_are_point_in_time_copies() {
        let service = test_service();
        let machine = service.add_machine("vm_001", "loc_001").unwrap();
        service.add_stock(machine.id, 1, 100).unwrap();

        service.save_records().unwrap();
        service.update_stock(machine.id, 1, 5).unwrap();

        let records = service.records_by_machine(machine.id).unwrap();
        assert_eq!(records[0].stock, 100);
    }
}
