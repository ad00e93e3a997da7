//! Wiring of the production components.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::{
    batch::{dispatcher::BatchDispatcher, reporter::BatchReporter, sink::TracingSink},
    config::Config,
    error::Error,
    registry::TaskRegistry,
    service::{resolver::EntityNameResolver, sync::EntitySyncService},
    worker::{handler::TaskHandler, WorkerPool},
};

/// Installs the global tracing subscriber.
///
/// Filters with `RUST_LOG`, defaulting to `heimdall=info`. Does nothing if a subscriber is
/// already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heimdall=info"));

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates and starts the worker pool executing tasks through `handler`.
pub async fn start_worker_pool(
    config: &Config,
    handler: Arc<dyn TaskHandler>,
) -> Result<WorkerPool, Error> {
    let pool = WorkerPool::new(config.worker_pool_config(), handler);
    pool.start().await?;

    Ok(pool)
}

/// Builds the sync service over the standard registry, reporting batch outcomes through
/// `tracing`.
pub fn build_sync_service(db: DatabaseConnection, pool: WorkerPool) -> EntitySyncService {
    let dispatcher = BatchDispatcher::new(
        Arc::new(EntityNameResolver::new(db)),
        Arc::new(pool),
        Arc::new(BatchReporter::new(Arc::new(TracingSink))),
    );

    EntitySyncService::new(TaskRegistry::standard(), dispatcher)
}
