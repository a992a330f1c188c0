use std::sync::Arc;

use configs::AppConfig;
use service::loans::LoanService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub loans: Arc<LoanService>,
    pub config: Arc<AppConfig>,
}

impl ServerState {
    pub fn new(loans: LoanService, config: AppConfig) -> Self {
        Self { loans: Arc::new(loans), config: Arc::new(config) }
    }
}
