use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::{Result, TransferError};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;
use tracing::{debug, warn};

/// An account snapshot read while its exclusive hold is taken.
///
/// Dropping it releases the hold.
#[derive(Debug)]
pub struct LockedAccount {
    account: Account,
    _guard: OwnedMutexGuard<()>,
}

impl LockedAccount {
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn id(&self) -> AccountId {
        self.account.id
    }
}

/// Per-account exclusive holds, always taken in ascending [`AccountId`] order.
///
/// Two transfers over the same pair in opposite directions both try the
/// smaller id first, so neither can hold one lock while waiting on the other.
/// Transfers over disjoint pairs never contend.
pub struct AccountLockManager {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl AccountLockManager {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    fn lock_for(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    /// Takes both holds or neither, within one overall deadline, then reads
    /// both accounts fresh from `store`.
    ///
    /// The result is returned in argument order, not lock order. A missing
    /// first account maps to `SenderNotFound`, a missing second one to
    /// `ReceiverNotFound`.
    pub async fn acquire<S>(
        &self,
        store: &S,
        id_a: AccountId,
        id_b: AccountId,
    ) -> Result<(LockedAccount, LockedAccount)>
    where
        S: AccountStore + ?Sized,
    {
        if id_a == id_b {
            return Err(TransferError::SelfTransferNotAllowed);
        }

        let (first, second) = if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) };
        let deadline = Instant::now() + self.timeout;

        let first_guard = self.lock_within(first, deadline).await?;
        // On timeout here `first_guard` is dropped on return, releasing the first hold.
        let second_guard = self.lock_within(second, deadline).await?;
        debug!(%first, %second, "account locks acquired");

        let (guard_a, guard_b) = if id_a == first {
            (first_guard, second_guard)
        } else {
            (second_guard, first_guard)
        };

        let account_a = store.get(id_a).await?.ok_or(TransferError::SenderNotFound)?;
        let account_b = store
            .get(id_b)
            .await?
            .ok_or(TransferError::ReceiverNotFound)?;

        Ok((
            LockedAccount {
                account: account_a,
                _guard: guard_a,
            },
            LockedAccount {
                account: account_b,
                _guard: guard_b,
            },
        ))
    }

    async fn lock_within(&self, id: AccountId, deadline: Instant) -> Result<OwnedMutexGuard<()>> {
        let lock = self.lock_for(id);
        tokio::time::timeout_at(deadline, lock.lock_owned())
            .await
            .map_err(|_| {
                warn!(account = %id, "timed out waiting for account lock");
                TransferError::LockTimeout
            })
    }
}
