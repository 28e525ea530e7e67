//! Simulation engine — one sequential fold over the signal series.
//!
//! Per period: settle the ledger, check the stop-loss, ask the policy for a
//! decision, execute it (immediately or through the ledger), then append a
//! mark-to-market portfolio value. All three policies share this driver; the
//! policy contributes only the decision.

pub mod config;
pub mod driver;
pub mod settlement;

pub use config::{ConfigError, EngineConfig};
pub use driver::{run_policy, PolicyRun};
pub use settlement::SettlementLedger;
