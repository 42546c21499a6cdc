//! Row models for the settlement pipeline tables.

pub mod balance;
pub mod import_config;
pub mod lead;
pub mod notification;
pub mod transaction;

pub use balance::Balance;
pub use import_config::ImportConfig;
pub use lead::Lead;
pub use notification::Notification;
pub use transaction::Transaction;
