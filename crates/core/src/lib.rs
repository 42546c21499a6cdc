//! Pure domain logic for the lead-import settlement pipeline.
//!
//! This crate holds everything that can be reasoned about without I/O:
//!
//! - [`mapping`] — dotted-path resolution over raw platform payloads and the
//!   declarative field-mapping transform.
//! - [`scoring`] — the deterministic 0–100 lead quality score.
//! - [`lead`] — canonical lead statuses and rejection reason strings.

pub mod lead;
pub mod mapping;
pub mod scoring;
pub mod types;
