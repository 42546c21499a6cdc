//! One repository unit-struct per table.

pub mod balance_repo;
pub mod import_config_repo;
pub mod lead_repo;
pub mod notification_repo;
pub mod transaction_repo;

pub use balance_repo::BalanceRepo;
pub use import_config_repo::ImportConfigRepo;
pub use lead_repo::LeadRepo;
pub use notification_repo::NotificationRepo;
pub use transaction_repo::TransactionRepo;
