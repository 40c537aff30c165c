/// Application context and dependency injection
use crate::{
    account::AccountStore,
    config::ServerConfig,
    db,
    error::AdminResult,
    moderation::{AuditLog, BulkOperationCoordinator, LifecycleEngine},
    query::QueryService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub account_store: AccountStore,
    pub lifecycle: Arc<LifecycleEngine>,
    pub query_service: Arc<QueryService>,
    pub bulk: Arc<BulkOperationCoordinator>,
    pub audit_log: Arc<AuditLog>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> AdminResult<Self> {
        config.validate()?;

        let pool = db::create_pool(&config.storage.account_db, db::DatabaseOptions::default())
            .await?;
        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        Ok(Self::with_pool(config, pool))
    }

    /// Wire the services over an existing pool (tests use an in-memory one)
    pub fn with_pool(config: ServerConfig, pool: SqlitePool) -> Self {
        let account_store = AccountStore::new(pool.clone());
        let lifecycle = Arc::new(LifecycleEngine::new(account_store.clone()));
        let query_service = Arc::new(QueryService::new(
            account_store.clone(),
            config.pagination.clone(),
        ));
        let bulk = Arc::new(BulkOperationCoordinator::new(
            Arc::clone(&lifecycle),
            config.moderation.bulk_concurrency,
        ));
        let audit_log = Arc::new(AuditLog::new(pool.clone()));

        Self {
            config: Arc::new(config),
            db: pool,
            account_store,
            lifecycle,
            query_service,
            bulk,
            audit_log,
        }
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
