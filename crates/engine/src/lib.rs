//! # Portfolio Service
//!
//! The central orchestrator of the analytics pipeline: it selects a user's
//! trades inside the trailing window from the injected ledger, runs the pure
//! metrics calculation over the snapshot, and guarantees the "never break the
//! dashboard" contract.
//!
//! ## Architectural Principles
//!
//! - **Infallible Boundary:** No error of any kind crosses the public API.
//!   Internal faults are explicit `Result`s up to this crate, where they are
//!   logged and collapsed into the same neutral metrics object an empty
//!   window produces.
//! - **Snapshot Semantics:** The service owns no mutable state; every call is
//!   a fresh projection of the ledger snapshot, so concurrent calls need no
//!   coordination here.
//!
//! ## Public API
//!
//! - `PortfolioService`: The orchestrator.
//! - `EngineError`: The internal error type (never escapes the service).

pub mod error;
pub mod service;

pub use error::EngineError;
pub use service::PortfolioService;
