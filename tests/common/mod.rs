#![allow(dead_code)]

use async_trait::async_trait;
use peerpay::application::executor::TransferExecutor;
use peerpay::config::EngineConfig;
use peerpay::domain::account::{Account, AccountId, Balance};
use peerpay::domain::event::TransactionCompleted;
use peerpay::domain::ports::{
    AccountStore, CommitBatch, EventPublisher, LedgerStore, Monitor, TransactionStore,
};
use peerpay::domain::transaction::{Transaction, TransactionId, TransferRequest};
use peerpay::error::{Result, TransferError};
use peerpay::infrastructure::in_memory::InMemoryLedgerStore;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub async fn seeded_store(balances: &[(u64, Decimal)]) -> InMemoryLedgerStore {
    let store = InMemoryLedgerStore::new();
    for (id, balance) in balances {
        let account = Account::open(AccountId(*id), Balance::new(*balance)).unwrap();
        AccountStore::store(&store, account).await.unwrap();
    }
    store
}

pub async fn balance_of<S: AccountStore + ?Sized>(store: &S, id: u64) -> Balance {
    store.get(AccountId(id)).await.unwrap().unwrap().balance
}

pub fn request(from: u64, to: u64, amount: Decimal) -> TransferRequest {
    TransferRequest::new(AccountId(from), AccountId(to), amount)
}

/// Collects every published event.
#[derive(Default, Clone)]
pub struct RecordingPublisher {
    pub events: Arc<Mutex<Vec<TransactionCompleted>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<TransactionCompleted> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &TransactionCompleted) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: &TransactionCompleted) -> Result<()> {
        Err(TransferError::PublishFailed("transport down".to_string()))
    }
}

/// Records what the executor escalates.
#[derive(Default, Clone)]
pub struct RecordingMonitor {
    pub publish_failures: Arc<Mutex<Vec<TransactionId>>>,
    pub durability_failures: Arc<Mutex<Vec<TransferRequest>>>,
}

impl Monitor for RecordingMonitor {
    fn publish_failed(&self, transaction: &Transaction, _error: &TransferError) {
        self.publish_failures.lock().unwrap().push(transaction.id);
    }

    fn durability_failed(&self, request: &TransferRequest, _error: &TransferError) {
        self.durability_failures.lock().unwrap().push(*request);
    }
}

/// Wraps an in-memory ledger, optionally delaying or refusing commits.
#[derive(Clone)]
pub struct FaultyStore {
    pub inner: InMemoryLedgerStore,
    pub fail_commits: bool,
    pub commit_delay: Option<Duration>,
}

impl FaultyStore {
    pub fn failing(inner: InMemoryLedgerStore) -> Self {
        Self {
            inner,
            fail_commits: true,
            commit_delay: None,
        }
    }

    pub fn slow(inner: InMemoryLedgerStore, delay: Duration) -> Self {
        Self {
            inner,
            fail_commits: false,
            commit_delay: Some(delay),
        }
    }
}

#[async_trait]
impl AccountStore for FaultyStore {
    async fn store(&self, account: Account) -> Result<()> {
        AccountStore::store(&self.inner, account).await
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        AccountStore::get(&self.inner, id).await
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        AccountStore::get_all(&self.inner).await
    }
}

#[async_trait]
impl TransactionStore for FaultyStore {
    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        TransactionStore::get(&self.inner, id).await
    }

    async fn get_all(&self) -> Result<Vec<Transaction>> {
        TransactionStore::get_all(&self.inner).await
    }
}

#[async_trait]
impl LedgerStore for FaultyStore {
    async fn commit(&self, batch: CommitBatch) -> Result<()> {
        if let Some(delay) = self.commit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_commits {
            return Err(TransferError::Storage("disk full".to_string()));
        }
        self.inner.commit(batch).await
    }
}

pub fn executor_over<S: LedgerStore + 'static>(
    store: S,
    config: EngineConfig,
    publisher: Arc<dyn EventPublisher>,
    monitor: Arc<dyn Monitor>,
) -> TransferExecutor {
    TransferExecutor::new(config, Arc::new(store), publisher, monitor)
}
