//! Webhook ingress service for the lead-import settlement pipeline.
//!
//! Exposes the platform verification handshake and delivery endpoints,
//! delegates each lead event to the settlement engine, and reports per-lead
//! results without ever failing a syntactically valid batch.

pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod signature;
pub mod state;
