use thiserror::Error;

/// Status reported to the response-serialization layer for a committed transfer.
pub const SUCCESS_STATUS: u16 = 201;

#[derive(Error, Debug)]
pub enum TransferError {
    // === Request validation ===
    #[error("Amount must be positive and expressible in cents")]
    InvalidAmount,

    #[error("Commission rate must be a non-negative fraction")]
    InvalidCommissionRate,

    #[error("Account balance cannot be negative")]
    NegativeBalance,

    #[error("Account balance must be expressible in cents")]
    InvalidBalance,

    #[error("Cannot transfer to self")]
    SelfTransferNotAllowed,

    #[error("Sender account not found")]
    SenderNotFound,

    #[error("Receiver account not found")]
    ReceiverNotFound,

    // === Business rules ===
    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Timed out waiting for account locks")]
    LockTimeout,

    // === System ===
    #[error("Transfer could not be made durable: {0}")]
    DurabilityFailure(String),

    #[error("Event publish failed: {0}")]
    PublishFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransferError {
    /// Stable error code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::InvalidCommissionRate => "INVALID_COMMISSION_RATE",
            TransferError::NegativeBalance => "NEGATIVE_BALANCE",
            TransferError::InvalidBalance => "INVALID_BALANCE",
            TransferError::SelfTransferNotAllowed => "SELF_TRANSFER_NOT_ALLOWED",
            TransferError::SenderNotFound => "SENDER_NOT_FOUND",
            TransferError::ReceiverNotFound => "RECEIVER_NOT_FOUND",
            TransferError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            TransferError::LockTimeout => "LOCK_TIMEOUT",
            TransferError::DurabilityFailure(_) => "DURABILITY_FAILURE",
            TransferError::PublishFailed(_) => "PUBLISH_FAILED",
            TransferError::Storage(_) => "STORAGE_ERROR",
            TransferError::Internal(_) => "INTERNAL_ERROR",
            TransferError::Csv(_) => "CSV_ERROR",
            TransferError::Io(_) => "IO_ERROR",
        }
    }

    /// HTTP status the response layer is expected to map this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidAmount
            | TransferError::SelfTransferNotAllowed
            | TransferError::ReceiverNotFound => 422,
            TransferError::InsufficientBalance
            | TransferError::LockTimeout
            | TransferError::InvalidCommissionRate
            | TransferError::NegativeBalance
            | TransferError::InvalidBalance
            | TransferError::Csv(_) => 400,
            TransferError::SenderNotFound => 404,
            TransferError::DurabilityFailure(_)
            | TransferError::PublishFailed(_)
            | TransferError::Storage(_)
            | TransferError::Internal(_)
            | TransferError::Io(_) => 500,
        }
    }

    /// Only lock contention is worth retrying; everything else fails the same way twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::LockTimeout)
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for TransferError {
    fn from(e: rocksdb::Error) -> Self {
        TransferError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(e: serde_json::Error) -> Self {
        TransferError::Storage(format!("Serialization error: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_is_created() {
        assert_eq!(SUCCESS_STATUS, 201);
        assert_eq!(TransferError::InvalidBalance.http_status(), 400);
        assert_eq!(TransferError::InvalidBalance.code(), "INVALID_BALANCE");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(TransferError::SelfTransferNotAllowed.http_status(), 422);
        assert_eq!(TransferError::InvalidAmount.http_status(), 422);
        assert_eq!(TransferError::ReceiverNotFound.http_status(), 422);
        assert_eq!(TransferError::InsufficientBalance.http_status(), 400);
        assert_eq!(TransferError::LockTimeout.http_status(), 400);
        assert_eq!(
            TransferError::DurabilityFailure("disk full".into()).http_status(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransferError::InsufficientBalance.code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            TransferError::SelfTransferNotAllowed.code(),
            "SELF_TRANSFER_NOT_ALLOWED"
        );
    }

    #[test]
    fn test_only_lock_timeout_is_retryable() {
        assert!(TransferError::LockTimeout.is_retryable());
        assert!(!TransferError::InsufficientBalance.is_retryable());
        assert!(!TransferError::DurabilityFailure("x".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransferError::SelfTransferNotAllowed.to_string(),
            "Cannot transfer to self"
        );
    }
}
