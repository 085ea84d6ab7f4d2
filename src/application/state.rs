use crate::error::{Result, TransferError};
use std::fmt;
use tracing::trace;

/// Lifecycle of one transfer inside the executor.
///
/// Success path: `Received → Locked → Validated → Applied → Committed`.
/// `Aborted` is reachable from every non-terminal state and leaves no
/// observable change behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferState {
    Received,
    Locked,
    Validated,
    Applied,
    Committed,
    Aborted,
}

impl TransferState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Committed | TransferState::Aborted)
    }

    pub fn can_transition_to(&self, next: TransferState) -> bool {
        use TransferState::*;
        match (*self, next) {
            (Received, Locked) | (Locked, Validated) | (Validated, Applied) | (Applied, Committed) => {
                true
            }
            (from, Aborted) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Moves to `next`, refusing transitions the lifecycle does not allow.
    pub fn advance(&mut self, next: TransferState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(TransferError::Internal(format!(
                "invalid transfer state transition {} -> {}",
                self, next
            )));
        }
        trace!(from = %self, to = %next, "transfer state");
        *self = next;
        Ok(())
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferState::Received => "RECEIVED",
            TransferState::Locked => "LOCKED",
            TransferState::Validated => "VALIDATED",
            TransferState::Applied => "APPLIED",
            TransferState::Committed => "COMMITTED",
            TransferState::Aborted => "ABORTED",
        };
        f.write_str(name)
    }
}
