pub mod config;
pub mod error;

pub use config::{ServiceConfig, StoreBackend};
pub use error::ServiceError;
