use crate::domain::account::{Account, AccountId};
use crate::domain::ports::{AccountStore, CommitBatch, LedgerStore, TransactionStore};
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{Result, TransferError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger: accounts plus committed transactions.
///
/// `commit` takes the account map's write lock before the transaction map's
/// and holds both while applying, so a reader sees either the whole batch
/// or none of it. Every path that needs both maps uses that same order.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryLedgerStore {
    async fn store(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
        Ok(())
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| a.id);
        Ok(all)
    }
}

#[async_trait]
impl TransactionStore for InMemoryLedgerStore {
    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let mut all: Vec<Transaction> = transactions.values().cloned().collect();
        all.sort_by_key(|tx| tx.id);
        Ok(all)
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn commit(&self, batch: CommitBatch) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let mut transactions = self.transactions.write().await;

        // Validate everything before touching either map.
        if transactions.contains_key(&batch.transaction.id) {
            return Err(TransferError::Storage(format!(
                "transaction {} already exists",
                batch.transaction.id
            )));
        }
        for account in [&batch.sender, &batch.receiver] {
            if !accounts.contains_key(&account.id) {
                return Err(TransferError::Storage(format!(
                    "account {} does not exist",
                    account.id
                )));
            }
        }

        accounts.insert(batch.sender.id, batch.sender);
        accounts.insert(batch.receiver.id, batch.receiver);
        transactions.insert(batch.transaction.id, batch.transaction);
        Ok(())
    }
}
