//! Domain model: money value objects, accounts, transactions and the ports
//! the transfer core talks through.

pub mod account;
pub mod commission;
pub mod event;
pub mod ports;
pub mod transaction;
