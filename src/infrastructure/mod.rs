//! Adapters behind the domain ports: stores, event publishers, monitoring.

pub mod in_memory;
pub mod monitor;
pub mod publisher;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
