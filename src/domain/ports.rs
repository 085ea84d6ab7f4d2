use super::account::{Account, AccountId};
use super::event::TransactionCompleted;
use super::transaction::{Transaction, TransactionId, TransferRequest};
use crate::error::{Result, TransferError};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts or replaces an account outside of any transfer (e.g. opening balances).
    async fn store(&self, account: Account) -> Result<()>;
    async fn get(&self, id: AccountId) -> Result<Option<Account>>;
    async fn get_all(&self) -> Result<Vec<Account>>;
}

/// Read side of the transaction ledger. Records are only ever written by
/// [`LedgerStore::commit`].
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>>;
    async fn get_all(&self) -> Result<Vec<Transaction>>;
}

/// Everything one transfer writes: both updated accounts and the new record.
#[derive(Debug, Clone)]
pub struct CommitBatch {
    pub sender: Account,
    pub receiver: Account,
    pub transaction: Transaction,
}

/// A store able to apply a [`CommitBatch`] all-or-nothing.
#[async_trait]
pub trait LedgerStore: AccountStore + TransactionStore {
    async fn commit(&self, batch: CommitBatch) -> Result<()>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &TransactionCompleted) -> Result<()>;
}

/// Operational sink for failures the core does not handle itself.
pub trait Monitor: Send + Sync {
    fn publish_failed(&self, transaction: &Transaction, error: &TransferError);
    fn durability_failed(&self, request: &TransferRequest, error: &TransferError);
}

pub type LedgerStoreRef = Arc<dyn LedgerStore>;
pub type EventPublisherRef = Arc<dyn EventPublisher>;
pub type MonitorRef = Arc<dyn Monitor>;
