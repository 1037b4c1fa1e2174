use std::sync::Arc;

use crate::config::ServerConfig;
use crate::tracker::IssueTracker;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, immutable after startup.
    pub config: Arc<ServerConfig>,
    /// Where issues are created.
    pub tracker: Arc<dyn IssueTracker>,
}
