use std::sync::Arc;

use crate::config::ServerConfig;
use crate::files::FileStore;
use crate::mailer::Mailer;
use crate::recorder::ActivityRecorder;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Best-effort project activity recorder.
    pub recorder: ActivityRecorder,
    /// Outbound mail (password-reset delivery).
    pub mailer: Arc<Mailer>,
    /// Durable storage for uploaded project files.
    pub files: Arc<dyn FileStore>,
}
