use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account, balance").unwrap();
    writeln!(accounts, "1, 10").unwrap();
    writeln!(accounts, "2, 0").unwrap();

    let mut transfers = NamedTempFile::new().unwrap();
    writeln!(transfers, "sender, receiver, amount").unwrap();
    writeln!(transfers, "1, 2, 1.00").unwrap();
    // Non-numeric amount
    writeln!(transfers, "1, 2, not_a_number").unwrap();
    // Non-integer account id
    writeln!(transfers, "abc, 2, 1.0").unwrap();
    writeln!(transfers, "1, 2, 2.00").unwrap();

    let mut cmd = Command::new(cargo_bin!("peerpay"));
    cmd.arg(transfers.path())
        .arg("--accounts")
        .arg(accounts.path())
        .arg("--commission-rate")
        .arg("0");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading transfer request"))
        .stdout(predicate::str::contains("1,7.00"))
        .stdout(predicate::str::contains("2,3.00"));
}

#[test]
fn test_invalid_amounts_and_unknown_accounts_are_rejected() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account, balance").unwrap();
    writeln!(accounts, "1, 10").unwrap();
    writeln!(accounts, "2, 0").unwrap();

    let mut transfers = NamedTempFile::new().unwrap();
    writeln!(transfers, "sender, receiver, amount").unwrap();
    writeln!(transfers, "1, 2, 0").unwrap();
    writeln!(transfers, "1, 2, -4").unwrap();
    writeln!(transfers, "1, 9, 1").unwrap();

    let mut cmd = Command::new(cargo_bin!("peerpay"));
    cmd.arg(transfers.path()).arg("--accounts").arg(accounts.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("INVALID_AMOUNT"))
        .stderr(predicate::str::contains("RECEIVER_NOT_FOUND"))
        .stdout(predicate::str::contains("1,10.00"))
        .stdout(predicate::str::contains("2,0.00"));
}

#[test]
fn test_negative_opening_balance_is_skipped() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account, balance").unwrap();
    writeln!(accounts, "1, -5").unwrap();
    writeln!(accounts, "2, 5").unwrap();

    let mut transfers = NamedTempFile::new().unwrap();
    writeln!(transfers, "sender, receiver, amount").unwrap();

    let mut cmd = Command::new(cargo_bin!("peerpay"));
    cmd.arg(transfers.path()).arg("--accounts").arg(accounts.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("skipping opening balance"))
        .stdout(predicate::str::contains("2,5.00"))
        .stdout(predicate::str::contains("1,").not());
}
