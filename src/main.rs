use clap::Parser;
use miette::{IntoDiagnostic, Result};
use peerpay::application::executor::TransferExecutor;
use peerpay::config::EngineConfig;
use peerpay::domain::commission::CommissionRate;
use peerpay::domain::ports::{AccountStore, LedgerStoreRef};
use peerpay::infrastructure::in_memory::InMemoryLedgerStore;
use peerpay::infrastructure::monitor::TracingMonitor;
use peerpay::infrastructure::publisher::LogPublisher;
use peerpay::interfaces::csv::account_reader::AccountReader;
use peerpay::interfaces::csv::account_writer::AccountWriter;
use peerpay::interfaces::csv::transfer_reader::TransferReader;
use peerpay::logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transfer requests CSV file (sender,receiver,amount)
    input: PathBuf,

    /// Opening balances CSV file (account,balance). Overwrites stored balances.
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Commission charged to the sender, as a fraction of the amount
    #[arg(long, env = "PEERPAY_COMMISSION_RATE", default_value_t = CommissionRate::default())]
    commission_rate: CommissionRate,

    /// Maximum wait for both account locks of one transfer, in milliseconds
    #[arg(long, env = "PEERPAY_LOCK_TIMEOUT_MS", default_value_t = 5000)]
    lock_timeout_ms: u64,

    /// Number of transfers allowed in flight at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> peerpay::error::Result<LedgerStoreRef> {
    use peerpay::infrastructure::rocksdb::RocksDBStore;

    let store: LedgerStoreRef = match db_path {
        Some(path) => Arc::new(RocksDBStore::open(path)?),
        None => Arc::new(InMemoryLedgerStore::new()),
    };
    Ok(store)
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> peerpay::error::Result<LedgerStoreRef> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Arc::new(InMemoryLedgerStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_json);

    let config = EngineConfig::default()
        .with_commission_rate(cli.commission_rate)
        .with_lock_timeout(Duration::from_millis(cli.lock_timeout_ms));
    let store = open_store(cli.db_path).into_diagnostic()?;

    if let Some(path) = cli.accounts {
        let reader = AccountReader::new(File::open(path).into_diagnostic()?);
        for account in reader.accounts() {
            match account {
                Ok(account) => AccountStore::store(store.as_ref(), account)
                    .await
                    .into_diagnostic()?,
                Err(e) => warn!(error = %e, "skipping opening balance"),
            }
        }
    }

    let executor = TransferExecutor::new(
        config,
        store.clone(),
        Arc::new(LogPublisher),
        Arc::new(TracingMonitor),
    );
    info!(rate = %executor.commission_rate(), "transfer engine ready");

    // Permits are taken before spawning, so with one permit requests run in file order.
    let permits = Arc::new(Semaphore::new(usize::from(cli.concurrency)));
    let mut tasks = JoinSet::new();
    let reader = TransferReader::new(File::open(cli.input).into_diagnostic()?);
    for (row, request) in reader.requests().enumerate() {
        match request {
            Ok(request) => {
                let permit = permits.clone().acquire_owned().await.into_diagnostic()?;
                let executor = executor.clone();
                tasks.spawn(async move {
                    let result = executor.execute(request).await;
                    drop(permit);
                    (request, result)
                });
            }
            Err(e) => warn!(row = row + 1, error = %e, "Error reading transfer request"),
        }
    }

    let (mut committed, mut rejected) = (0usize, 0usize);
    while let Some(joined) = tasks.join_next().await {
        let (request, result) = joined.into_diagnostic()?;
        match result {
            Ok(_) => committed += 1,
            Err(e) => {
                rejected += 1;
                warn!(
                    sender = %request.sender_id,
                    receiver = %request.receiver_id,
                    amount = %request.amount,
                    code = e.code(),
                    status = e.http_status(),
                    retryable = e.is_retryable(),
                    "transfer rejected: {}",
                    e
                );
            }
        }
    }
    info!(committed, rejected, "all transfers processed");

    let accounts = AccountStore::get_all(store.as_ref()).await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
