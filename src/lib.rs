//! Atomic peer-to-peer balance transfers.
//!
//! A transfer debits `amount + commission` from the sender, credits `amount`
//! to the receiver and records an immutable [`Transaction`], all in one
//! atomic commit, then announces the result through an [`EventPublisher`].
//!
//! [`Transaction`]: domain::transaction::Transaction
//! [`EventPublisher`]: domain::ports::EventPublisher

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
