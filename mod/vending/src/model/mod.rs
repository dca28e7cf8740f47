pub mod product;
pub mod stock;
pub mod stock_record;
pub mod vending_machine;

pub use product::Product;
pub use stock::{Stock, StockLevel};
pub use stock_record::StockRecord;
pub use vending_machine::VendingMachine;
