//! Application layer: the transfer core.
//!
//! `TransferExecutor` drives each request through lock acquisition
//! (`AccountLockManager`), validation (`TransferValidator`), mutation and a
//! single atomic commit, tracking progress with `TransferState`.

pub mod executor;
pub mod lock_manager;
pub mod state;
pub mod validator;
