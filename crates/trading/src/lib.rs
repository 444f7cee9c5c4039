//! # Trading Engine
//!
//! This crate is the position tracker and P&L realizer. It is the only writer
//! of the trade ledger: every simulated fill enters the system through
//! `record_buy` / `record_sell`, and realized profit-or-loss is attributed at
//! sell time.
//!
//! ## Architectural Principles
//!
//! - **Realization at the Boundary:** A trade's `result` is computed once,
//!   when the sell is recorded, and never rewritten. Downstream analytics
//!   treat it as immutable history.
//! - **Single-Reference-Price Matching:** A sell is priced against the most
//!   recently recorded buy for the same (user, symbol) pair, without
//!   decrementing that buy's quantity. This is a deliberate simplification of
//!   lot-level FIFO accounting; see DESIGN.md for the trade-off.
//!
//! ## Public API
//!
//! - `TradingEngine`: Records fills and derives open positions.
//! - `TradingError`: The specific error types that can be returned from this crate.

pub mod engine;
pub mod error;

pub use engine::TradingEngine;
pub use error::TradingError;
