//! Commission fee calculation.
//!
//! Fees are rounded half-up to whole cents. Every fee in the system goes
//! through [`CommissionCalculator::compute`], so the conservation identity
//! `sender_before + receiver_before - fee == sender_after + receiver_after`
//! holds exactly.

use super::account::{Amount, Balance, CURRENCY_SCALE};
use crate::error::{Result, TransferError};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative commission fraction (0.015 = 1.5%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct CommissionRate(Decimal);

impl CommissionRate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(TransferError::InvalidCommissionRate);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        Self(dec!(0.015))
    }
}

impl FromStr for CommissionRate {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim()).map_err(|_| TransferError::InvalidCommissionRate)?;
        Self::new(value)
    }
}

impl fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct CommissionCalculator;

impl CommissionCalculator {
    /// Computes the fee for a raw requested amount.
    ///
    /// Fails with `InvalidAmount` if the amount is not strictly positive.
    pub fn compute(amount: Decimal, rate: CommissionRate) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        Self::fee_for(amount, rate)
    }

    /// Fee for an already validated amount.
    ///
    /// A fee too large to represent is more than any balance can cover, so
    /// it fails with `InsufficientBalance`.
    pub fn fee_for(amount: Amount, rate: CommissionRate) -> Result<Balance> {
        let fee = amount
            .value()
            .checked_mul(rate.value())
            .ok_or(TransferError::InsufficientBalance)?
            .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Ok(Balance::new(fee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(s: &str) -> CommissionRate {
        s.parse().unwrap()
    }

    #[test]
    fn test_standard_fee() {
        let fee = CommissionCalculator::compute(dec!(100), rate("0.015")).unwrap();
        assert_eq!(fee, Balance::new(dec!(1.50)));
    }

    #[test]
    fn test_half_up_rounding() {
        // 1.00 * 0.005 = 0.005 -> 0.01
        let fee = CommissionCalculator::compute(dec!(1.00), rate("0.005")).unwrap();
        assert_eq!(fee, Balance::new(dec!(0.01)));

        // 0.30 * 0.015 = 0.0045 -> 0.00
        let fee = CommissionCalculator::compute(dec!(0.30), rate("0.015")).unwrap();
        assert_eq!(fee, Balance::ZERO);

        // 33.33 * 0.015 = 0.49995 -> 0.50
        let fee = CommissionCalculator::compute(dec!(33.33), rate("0.015")).unwrap();
        assert_eq!(fee, Balance::new(dec!(0.50)));
    }

    #[test]
    fn test_zero_rate() {
        let fee = CommissionCalculator::compute(dec!(250.75), CommissionRate::ZERO).unwrap();
        assert_eq!(fee, Balance::ZERO);
    }

    #[test]
    fn test_invalid_amount() {
        assert!(matches!(
            CommissionCalculator::compute(dec!(0), rate("0.015")),
            Err(TransferError::InvalidAmount)
        ));
        assert!(matches!(
            CommissionCalculator::compute(dec!(-5), rate("0.015")),
            Err(TransferError::InvalidAmount)
        ));
    }

    #[test]
    fn test_overflowing_fee_is_refused() {
        assert!(matches!(
            CommissionCalculator::compute(Decimal::MAX, rate("2")),
            Err(TransferError::InsufficientBalance)
        ));
        // Large but representable products still price normally.
        let fee = CommissionCalculator::compute(dec!(1000000000000), rate("0.015")).unwrap();
        assert_eq!(fee, Balance::new(dec!(15000000000)));
    }

    #[test]
    fn test_rate_parsing() {
        assert_eq!(rate(" 0.02 ").value(), dec!(0.02));
        assert!(matches!(
            "-0.01".parse::<CommissionRate>(),
            Err(TransferError::InvalidCommissionRate)
        ));
        assert!(matches!(
            "abc".parse::<CommissionRate>(),
            Err(TransferError::InvalidCommissionRate)
        ));
    }

    #[test]
    fn test_default_rate_is_one_and_a_half_percent() {
        assert_eq!(CommissionRate::default().value(), dec!(0.015));
    }
}
