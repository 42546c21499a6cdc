use std::sync::Arc;

use leadflow_settlement::SettlementEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadflow_db::DbPool,
    /// Server configuration (verify token, app secret, timeouts).
    pub config: Arc<ServerConfig>,
    /// The settlement engine with its injected platform collaborators.
    pub engine: Arc<SettlementEngine>,
}
