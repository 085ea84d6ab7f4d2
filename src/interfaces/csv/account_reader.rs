use crate::domain::account::{Account, AccountId, Balance};
use crate::error::{Result, TransferError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct OpeningBalance {
    account: AccountId,
    #[serde(with = "rust_decimal::serde::str")]
    balance: Decimal,
}

/// Reads opening balances (`account,balance`) from a CSV source.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one opened account per row; negative balances are rejected.
    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        self.reader.into_deserialize::<OpeningBalance>().map(|row| {
            let row = row.map_err(TransferError::from)?;
            Account::open(row.account, Balance::new(row.balance))
        })
    }
}
