use super::lock_manager::AccountLockManager;
use super::state::TransferState;
use super::validator::TransferValidator;
use crate::config::EngineConfig;
use crate::domain::commission::{CommissionCalculator, CommissionRate};
use crate::domain::event::TransactionCompleted;
use crate::domain::ports::{
    AccountStore, CommitBatch, EventPublisherRef, LedgerStoreRef, MonitorRef,
};
use crate::domain::transaction::{Transaction, TransferRequest};
use crate::error::{Result, SUCCESS_STATUS, TransferError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs balance transfers as single atomic units.
///
/// Any number of tasks may call [`TransferExecutor::execute`] at once; the
/// only serialization is per account, through [`AccountLockManager`].
/// Cloning is cheap and clones share stores, locks and publisher.
#[derive(Clone)]
pub struct TransferExecutor {
    store: LedgerStoreRef,
    locks: Arc<AccountLockManager>,
    publisher: EventPublisherRef,
    monitor: MonitorRef,
    commission_rate: CommissionRate,
}

impl TransferExecutor {
    pub fn new(
        config: EngineConfig,
        store: LedgerStoreRef,
        publisher: EventPublisherRef,
        monitor: MonitorRef,
    ) -> Self {
        Self {
            store,
            locks: Arc::new(AccountLockManager::new(config.lock_timeout)),
            publisher,
            monitor,
            commission_rate: config.commission_rate,
        }
    }

    pub fn commission_rate(&self) -> CommissionRate {
        self.commission_rate
    }

    /// Executes a transfer at the configured commission rate.
    pub async fn execute(&self, request: TransferRequest) -> Result<TransactionCompleted> {
        self.execute_with_rate(request, self.commission_rate).await
    }

    /// Executes a transfer at an explicit commission rate.
    ///
    /// Request-level failures (self-transfer, bad amount, unknown accounts)
    /// are reported before any lock is taken. Dropping the returned future
    /// before that point costs nothing; past it, the locked section runs on
    /// its own task and always reaches `Committed` or `Aborted`.
    pub async fn execute_with_rate(
        &self,
        request: TransferRequest,
        rate: CommissionRate,
    ) -> Result<TransactionCompleted> {
        TransferValidator::check_request(&request)?;

        let store = self.store.as_ref();
        if AccountStore::get(store, request.sender_id).await?.is_none() {
            return Err(TransferError::SenderNotFound);
        }
        if AccountStore::get(store, request.receiver_id).await?.is_none() {
            return Err(TransferError::ReceiverNotFound);
        }

        let executor = self.clone();
        tokio::spawn(async move { executor.run_locked(request, rate).await })
            .await
            .map_err(|e| TransferError::Internal(format!("transfer task failed: {}", e)))?
    }

    async fn run_locked(
        &self,
        request: TransferRequest,
        rate: CommissionRate,
    ) -> Result<TransactionCompleted> {
        let mut state = TransferState::Received;
        let result = self.lock_apply_commit(&request, rate, &mut state).await;

        match &result {
            Ok(completed) => {
                info!(
                    tx = %completed.transaction.id,
                    sender = %request.sender_id,
                    receiver = %request.receiver_id,
                    amount = %request.amount,
                    fee = %completed.transaction.commission_fee,
                    status = SUCCESS_STATUS,
                    "transfer committed"
                );
                // Best effort: a committed transfer stays committed whatever happens here.
                if let Err(e) = self.publisher.publish(completed).await {
                    warn!(tx = %completed.transaction.id, error = %e, "publish failed");
                    self.monitor.publish_failed(&completed.transaction, &e);
                }
            }
            Err(e) => {
                if !state.is_terminal() {
                    state.advance(TransferState::Aborted)?;
                }
                debug!(
                    sender = %request.sender_id,
                    receiver = %request.receiver_id,
                    code = e.code(),
                    "transfer aborted"
                );
            }
        }
        result
    }

    async fn lock_apply_commit(
        &self,
        request: &TransferRequest,
        rate: CommissionRate,
        state: &mut TransferState,
    ) -> Result<TransactionCompleted> {
        let (sender, receiver) = self
            .locks
            .acquire(self.store.as_ref(), request.sender_id, request.receiver_id)
            .await?;
        state.advance(TransferState::Locked)?;

        let fee = CommissionCalculator::compute(request.amount, rate)?;
        let validated = TransferValidator::validate(request, sender.account(), receiver.account(), fee)?;
        state.advance(TransferState::Validated)?;

        // Mutate copies only; the stored rows change solely through the commit below.
        let mut sender_after = sender.account().clone();
        let mut receiver_after = receiver.account().clone();
        sender_after.debit(validated.total_debit()?)?;
        receiver_after.credit(validated.amount.into())?;
        state.advance(TransferState::Applied)?;

        let transaction = Transaction::new(
            request.sender_id,
            request.receiver_id,
            validated.amount,
            validated.fee,
        );
        let batch = CommitBatch {
            sender: sender_after.clone(),
            receiver: receiver_after.clone(),
            transaction: transaction.clone(),
        };
        if let Err(e) = self.store.commit(batch).await {
            let err = TransferError::DurabilityFailure(e.to_string());
            self.monitor.durability_failed(request, &err);
            return Err(err);
        }
        state.advance(TransferState::Committed)?;

        // Held until durability is confirmed.
        drop(sender);
        drop(receiver);

        Ok(TransactionCompleted {
            transaction,
            sender_balance: sender_after.balance,
            receiver_balance: receiver_after.balance,
        })
    }
}
