//! Group record sources (where raw expenses, settlements and rosters come from).

pub mod in_memory;
pub mod source;

pub use in_memory::InMemoryGroupStore;
pub use source::{GroupRecordSource, StoreError};
