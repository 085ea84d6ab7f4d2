use super::account::{AccountId, Amount, Balance};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Transaction identifier.
///
/// ULIDs need no coordination between workers and sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Ulid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes()
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

/// A transfer as submitted by a caller.
///
/// `amount` is kept raw so that a non-positive value is reported as
/// `InvalidAmount` by the validator instead of failing to parse.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct TransferRequest {
    #[serde(alias = "sender")]
    pub sender_id: AccountId,
    #[serde(alias = "receiver")]
    pub receiver_id: AccountId,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(sender_id: AccountId, receiver_id: AccountId, amount: Decimal) -> Self {
        Self {
            sender_id,
            receiver_id,
            amount,
        }
    }
}

/// An immutable record of a committed transfer.
///
/// This is the persisted schema other components read back; fields are only
/// ever added, never renamed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub amount: Amount,
    pub commission_fee: Balance,
    /// Taken immediately before the record is handed to the store for commit.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: Amount,
        commission_fee: Balance,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            sender_id,
            receiver_id,
            amount,
            commission_fee,
            created_at: Utc::now(),
        }
    }
}
