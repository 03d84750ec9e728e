//! Application wiring: database, stores, service and interceptor.

use std::sync::Arc;

use crate::audit::AuditLog;
use crate::config::{AppConfig, ConfigError};
use crate::db::{Database, StoreError};
use crate::http::{AppState, ServerError};
use crate::intercept::AuditInterceptor;
use crate::users::{operations, seed_users, UserRepository, UserService};

/// Errors surfaced by the binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Fully wired application components.
#[derive(Debug, Clone)]
pub struct App {
    pub audit: AuditLog,
    pub users: Arc<UserService>,
    pub interceptor: AuditInterceptor,
}

impl App {
    /// Open the configured database and register interception rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn open(config: &AppConfig) -> Result<Self, AppError> {
        let db = Database::open(&config.database.path).await?;
        Ok(Self::with_database(db, config))
    }

    /// Wire the application over an already opened database.
    #[must_use]
    pub fn with_database(db: Database, config: &AppConfig) -> Self {
        let audit = AuditLog::new(db.clone());
        let users = Arc::new(UserService::new(UserRepository::new(db)));
        let registry = config.audit.policy().register(operations::OPERATIONS);
        let interceptor = AuditInterceptor::new(Arc::new(audit.clone()), registry);

        Self {
            audit,
            users,
            interceptor,
        }
    }

    /// Load the seed users if the database has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn seed(&self) -> Result<usize, AppError> {
        Ok(seed_users(self.users.repository()).await?)
    }

    /// Handler state for the HTTP server.
    #[must_use]
    pub fn state(&self) -> AppState {
        AppState::new(self.users.clone(), self.interceptor.clone())
    }
}
