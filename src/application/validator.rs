use crate::domain::account::{Account, Amount, Balance};
use crate::domain::transaction::TransferRequest;
use crate::error::{Result, TransferError};

/// A request that passed validation against locked balances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedTransfer {
    pub amount: Amount,
    pub fee: Balance,
}

impl ValidatedTransfer {
    /// Amount plus fee. A total too large to represent cannot be covered by
    /// any balance and fails with `InsufficientBalance`.
    pub fn total_debit(&self) -> Result<Balance> {
        Balance::from(self.amount)
            .checked_add(self.fee)
            .ok_or(TransferError::InsufficientBalance)
    }
}

pub struct TransferValidator;

impl TransferValidator {
    /// Lock-free checks that do not depend on any balance.
    pub fn check_request(request: &TransferRequest) -> Result<Amount> {
        if request.sender_id == request.receiver_id {
            return Err(TransferError::SelfTransferNotAllowed);
        }
        Amount::new(request.amount)
    }

    /// Checks the request against the balances read under lock.
    ///
    /// Balances read before the locks were taken may be stale, so the
    /// sufficiency check here is the one that counts.
    pub fn validate(
        request: &TransferRequest,
        sender: &Account,
        receiver: &Account,
        fee: Balance,
    ) -> Result<ValidatedTransfer> {
        let amount = Self::check_request(request)?;
        if sender.id != request.sender_id || receiver.id != request.receiver_id {
            return Err(TransferError::Internal(format!(
                "locked accounts {}/{} do not match request {}/{}",
                sender.id, receiver.id, request.sender_id, request.receiver_id
            )));
        }

        let validated = ValidatedTransfer { amount, fee };
        if sender.balance < validated.total_debit()? {
            return Err(TransferError::InsufficientBalance);
        }
        Ok(validated)
    }
}
