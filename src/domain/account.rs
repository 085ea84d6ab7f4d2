use crate::error::{Result, TransferError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places in the smallest currency unit (cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Identifier of an account.
///
/// The derived `Ord` is the canonical lock order used by the lock manager.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-point monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal`; it never goes through
/// floating point, so repeated arithmetic does not drift.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A strictly positive monetary amount, representable in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO || value.normalize().scale() > CURRENCY_SCALE {
            return Err(TransferError::InvalidAmount);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `None` when the sum is not representable.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// True when the value has no digits below one cent.
    pub fn is_whole_cents(&self) -> bool {
        self.0.normalize().scale() <= CURRENCY_SCALE
    }

    /// The value padded to whole cents, for display.
    pub fn to_cents(self) -> Decimal {
        let mut value = self.0;
        value.rescale(CURRENCY_SCALE);
        value
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cents())
    }
}

/// A wallet account.
///
/// Balances only move through [`Account::debit`] and [`Account::credit`],
/// which the transfer executor calls on copies it holds under lock.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub id: AccountId,
    pub balance: Balance,
}

impl Account {
    /// Opens an account with an initial balance, which must not be negative
    /// and must be expressible in whole cents.
    pub fn open(id: AccountId, balance: Balance) -> Result<Self> {
        if balance.is_negative() {
            return Err(TransferError::NegativeBalance);
        }
        if !balance.is_whole_cents() {
            return Err(TransferError::InvalidBalance);
        }
        Ok(Self { id, balance })
    }

    /// Credits the balance. A result too large to represent is refused with
    /// `InvalidAmount` and leaves the balance unchanged.
    pub fn credit(&mut self, amount: Balance) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TransferError::InvalidAmount)?;
        Ok(())
    }

    /// Debits the balance, refusing to take it below zero.
    pub fn debit(&mut self, amount: Balance) -> Result<()> {
        if self.balance < amount {
            return Err(TransferError::InsufficientBalance);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientBalance)?;
        Ok(())
    }
}
