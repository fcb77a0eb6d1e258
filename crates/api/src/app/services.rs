use std::sync::Arc;

use splitledger_infra::{BalanceConfig, BalanceService, InMemoryGroupStore};

/// Services shared by all handlers.
///
/// Writes go straight to the store; reads go through the balance service so
/// that every report is gathered, checked and computed the same way.
#[derive(Debug)]
pub struct AppServices {
    pub store: Arc<InMemoryGroupStore>,
    pub balances: BalanceService<Arc<InMemoryGroupStore>>,
}

impl AppServices {
    pub fn new(store: Arc<InMemoryGroupStore>, config: BalanceConfig) -> Self {
        Self {
            balances: BalanceService::new(store.clone(), config),
            store,
        }
    }
}

/// In-memory wiring (dev/test).
pub fn build_services(config: BalanceConfig) -> AppServices {
    tracing::info!(
        gather_timeout_ms = config.gather_timeout.as_millis() as u64,
        overpayment_policy = config.overpayment_policy.as_str(),
        "using in-memory group store"
    );
    AppServices::new(Arc::new(InMemoryGroupStore::new()), config)
}
