use crate::domain::ports::Monitor;
use crate::domain::transaction::{Transaction, TransferRequest};
use crate::error::TransferError;
use tracing::error;

/// Reports operational failures as `error` level log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMonitor;

impl Monitor for TracingMonitor {
    fn publish_failed(&self, transaction: &Transaction, err: &TransferError) {
        error!(
            tx = %transaction.id,
            sender = %transaction.sender_id,
            receiver = %transaction.receiver_id,
            code = err.code(),
            error = %err,
            "committed transfer could not be announced"
        );
    }

    fn durability_failed(&self, request: &TransferRequest, err: &TransferError) {
        error!(
            sender = %request.sender_id,
            receiver = %request.receiver_id,
            amount = %request.amount,
            code = err.code(),
            error = %err,
            "transfer commit failed; nothing was written"
        );
    }
}
