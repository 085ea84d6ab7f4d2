use crate::domain::commission::CommissionRate;
use std::time::Duration;

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Values the executor is constructed with. Where they come from (flags,
/// env, a settings service) is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub commission_rate: CommissionRate,
    /// Upper bound on waiting for both account locks of one transfer.
    pub lock_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commission_rate: CommissionRate::default(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

impl EngineConfig {
    pub fn with_commission_rate(mut self, rate: CommissionRate) -> Self {
        self.commission_rate = rate;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }
}
