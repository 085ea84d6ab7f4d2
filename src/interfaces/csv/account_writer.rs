use crate::domain::account::Account;
use crate::error::Result;
use std::io::Write;

/// Writes account balances as `account,balance` CSV, amounts in whole cents.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the header and one row per account, ordered by account id.
    pub fn write_accounts(&mut self, mut accounts: Vec<Account>) -> Result<()> {
        accounts.sort_by_key(|a| a.id);
        self.writer.write_record(["account", "balance"])?;
        for account in accounts {
            self.writer
                .write_record([account.id.to_string(), account.balance.to_string()])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
