use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("The ledger lock was poisoned by a panicking writer")]
    Poisoned,
}
