use crate::domain::account::{Account, AccountId};
use crate::domain::ports::{AccountStore, CommitBatch, LedgerStore, TransactionStore};
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{Result, TransferError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing account balances.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for storing committed transactions.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent ledger backed by RocksDB.
///
/// Accounts are keyed by big-endian `u64` id, transactions by their 16 ULID
/// bytes, so both iterate in a meaningful order. A transfer commit is one
/// `WriteBatch`, which RocksDB applies atomically.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// "accounts" and "transactions" column families if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_transactions])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| TransferError::Storage(format!("column family {} not found", name)))
    }

    fn read<T: DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_pinned_cf(cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn read_all<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

fn account_key(id: AccountId) -> [u8; 8] {
    id.0.to_be_bytes()
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn store(&self, account: Account) -> Result<()> {
        let cf = self.cf(CF_ACCOUNTS)?;
        let value = serde_json::to_vec(&account)?;
        self.db.put_cf(cf, account_key(account.id), value)?;
        Ok(())
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        self.read(CF_ACCOUNTS, &account_key(id))
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        self.read_all(CF_ACCOUNTS)
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        self.read(CF_TRANSACTIONS, &id.to_bytes())
    }

    async fn get_all(&self) -> Result<Vec<Transaction>> {
        self.read_all(CF_TRANSACTIONS)
    }
}

#[async_trait]
impl LedgerStore for RocksDBStore {
    async fn commit(&self, batch: CommitBatch) -> Result<()> {
        let accounts = self.cf(CF_ACCOUNTS)?;
        let transactions = self.cf(CF_TRANSACTIONS)?;

        // Serialize everything first so a failure leaves the batch unwritten.
        let sender = serde_json::to_vec(&batch.sender)?;
        let receiver = serde_json::to_vec(&batch.receiver)?;
        let transaction = serde_json::to_vec(&batch.transaction)?;

        let mut write = WriteBatch::default();
        write.put_cf(accounts, account_key(batch.sender.id), sender);
        write.put_cf(accounts, account_key(batch.receiver.id), receiver);
        write.put_cf(transactions, batch.transaction.id.to_bytes(), transaction);
        self.db.write(write)?;
        Ok(())
    }
}
