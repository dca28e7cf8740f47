pub mod config;
pub mod envelope;
pub mod error;
pub mod module;
pub mod types;

pub use config::ServiceConfig;
pub use envelope::{Envelope, with_id};
pub use error::ServiceError;
pub use module::Module;
pub use types::now_rfc3339;
