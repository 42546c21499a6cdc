//! Lead settlement: the per-event state machine and the ledger policy.
//!
//! [`SettlementEngine`](engine::SettlementEngine) drives one inbound lead
//! event through resolve → fetch → map → score → filter → persist → charge →
//! deliver, converting every expected failure into a structured
//! [`SettlementOutcome`](engine::SettlementOutcome). [`ledger`] implements
//! the check / auto-recharge / atomic-deduct policy on top of the
//! storage-layer primitives.

pub mod engine;
pub mod ledger;

pub use engine::{LeadEvent, SettlementEngine, SettlementOutcome};
pub use ledger::{Ledger, LedgerOutcome};
