//! Infrastructure layer: record sources, config, and the balance service.

pub mod config;
pub mod records;
pub mod service;

pub use config::BalanceConfig;
pub use records::{GroupRecordSource, InMemoryGroupStore, StoreError};
pub use service::{BalanceService, GroupSnapshot, ServiceError};
