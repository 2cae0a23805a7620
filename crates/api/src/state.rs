use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// The pool is the injected store handle: every orchestrator call receives it
/// explicitly through this state, never through process-global storage.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tea_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
