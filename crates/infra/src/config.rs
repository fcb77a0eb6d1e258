//! Configuration loading and representation.

use std::time::Duration;

use splitledger_balances::OverpaymentPolicy;

pub const GATHER_TIMEOUT_ENV: &str = "SPLITLEDGER_GATHER_TIMEOUT_MS";
pub const OVERPAYMENT_POLICY_ENV: &str = "SPLITLEDGER_OVERPAYMENT_POLICY";

const DEFAULT_GATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Knobs for the balance service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceConfig {
    /// Upper bound on reading a group's records; compute is not covered.
    pub gather_timeout: Duration,
    pub overpayment_policy: OverpaymentPolicy,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            gather_timeout: DEFAULT_GATHER_TIMEOUT,
            overpayment_policy: OverpaymentPolicy::default(),
        }
    }
}

impl BalanceConfig {
    /// Load from process environment, falling back to defaults on bad values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(GATHER_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.gather_timeout = Duration::from_millis(ms),
                _ => tracing::warn!(
                    value = %raw,
                    "{GATHER_TIMEOUT_ENV} is not a positive integer; using default"
                ),
            }
        }

        if let Some(raw) = lookup(OVERPAYMENT_POLICY_ENV) {
            match raw.parse::<OverpaymentPolicy>() {
                Ok(policy) => config.overpayment_policy = policy,
                Err(e) => tracing::warn!("{OVERPAYMENT_POLICY_ENV}: {e}; using default"),
            }
        }

        config
    }
}
