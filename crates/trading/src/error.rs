use core_types::CoreError;
use ledger::LedgerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] CoreError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
