use analytics::AnalyticsError;
use ledger::LedgerError;
use thiserror::Error;

/// Internal fault taxonomy of the orchestrator. These are contained at the
/// public boundary and never returned to callers.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
