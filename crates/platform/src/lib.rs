//! Outbound collaborators behind traits.
//!
//! - [`lead_source`] — the advertising-platform lead fetch:
//!   [`LeadSource`](lead_source::LeadSource) plus the reqwest-backed
//!   [`GraphLeadClient`](lead_source::GraphLeadClient).
//! - [`recharge`] — the abstract payment collaborator used by the ledger's
//!   auto-recharge path.
//!
//! Both traits are object-safe so the settlement engine and the API can be
//! constructed with fakes in tests.

pub mod lead_source;
pub mod recharge;

pub use lead_source::{FetchError, GraphLeadClient, LeadSource, RawLead};
pub use recharge::{DeniedRecharge, RechargeError, RechargeProvider};
