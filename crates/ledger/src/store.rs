use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use core_types::TradeRecord;
use std::sync::RwLock;

/// The repository interface over the append-only trade ledger.
///
/// Implementations must preserve insertion order: "most recently recorded"
/// is defined by append order, and the P&L matching policy depends on it.
pub trait TradeLedger: Send + Sync {
    /// Appends a trade to the end of the ledger.
    fn append(&self, trade: TradeRecord) -> Result<(), LedgerError>;

    /// Returns every trade for a user, in insertion order.
    fn trades_for_user(&self, user_id: i64) -> Result<Vec<TradeRecord>, LedgerError>;

    /// Returns a user's trades whose timestamps fall inside `[start, end]`
    /// (inclusive on both ends), in insertion order.
    fn trades_in_window(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeRecord>, LedgerError>;
}

/// The in-memory ledger implementation.
///
/// A single `RwLock` over the backing vector is sufficient: appends are rare
/// relative to reads, and readers only ever take short snapshots.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<Vec<TradeRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all users.
    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.entries.read().map_err(|_| LedgerError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}

impl TradeLedger for InMemoryLedger {
    fn append(&self, trade: TradeRecord) -> Result<(), LedgerError> {
        let mut entries = self.entries.write().map_err(|_| LedgerError::Poisoned)?;
        entries.push(trade);
        Ok(())
    }

    fn trades_for_user(&self, user_id: i64) -> Result<Vec<TradeRecord>, LedgerError> {
        let entries = self.entries.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(entries
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn trades_in_window(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeRecord>, LedgerError> {
        let entries = self.entries.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(entries
            .iter()
            .filter(|t| t.user_id == user_id && t.timestamp >= start && t.timestamp <= end)
            .cloned()
            .collect())
    }
}
