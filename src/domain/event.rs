use super::account::Balance;
use super::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Emitted once a transfer is durable.
///
/// Doubles as the success result of the executor: the committed record plus
/// both post-transfer balances.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionCompleted {
    pub transaction: Transaction,
    pub sender_balance: Balance,
    pub receiver_balance: Balance,
}

impl TransactionCompleted {
    pub const NAME: &'static str = "TransactionCompleted";

    /// Private channels of both parties.
    pub fn channels(&self) -> [String; 2] {
        [
            format!("user.{}", self.transaction.sender_id),
            format!("user.{}", self.transaction.receiver_id),
        ]
    }
}
