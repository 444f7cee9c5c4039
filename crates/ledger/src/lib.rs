//! # Trade Ledger
//!
//! This crate is the system's "book of record": an ordered, append-only
//! sequence of trade records per user.
//!
//! ## Architectural Principles
//!
//! - **Injected Repository:** Consumers depend on the `TradeLedger` trait, not
//!   on a concrete store. The analytics engine stays a pure function of the
//!   snapshot it is handed and is testable without any process-wide state.
//! - **Concurrency Lives Here:** Safe concurrent append/read is this crate's
//!   responsibility. Everything downstream works on owned snapshots and needs
//!   no locking of its own.
//!
//! ## Public API
//!
//! - `TradeLedger`: The repository trait (append + windowed query).
//! - `InMemoryLedger`: The thread-safe, in-memory implementation.
//! - `LedgerError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::LedgerError;
pub use store::{InMemoryLedger, TradeLedger};
