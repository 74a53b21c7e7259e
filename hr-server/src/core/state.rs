use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::hierarchy::HierarchyService;
use crate::seed;

/// Handles shared by every request
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | settings (immutable) |
/// | pool | SqlitePool | directory store |
/// | jwt_service | Arc<JwtService> | token issue/validation |
/// | hierarchy | HierarchyService | rules engine over `pool` |
///
/// Cloning is cheap: the pool and the engine share one connection pool.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub hierarchy: HierarchyService,
}

impl ServerState {
    /// Build state around an already opened database
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let hierarchy = HierarchyService::new(db.pool.clone());
        Self {
            config,
            pool: db.pool,
            jwt_service,
            hierarchy,
        }
    }

    /// Open the database, apply migrations and seed when configured
    ///
    /// 1. `work_dir` exists
    /// 2. database at `database_path`
    /// 3. demo organization (`SEED_DEMO_DATA`)
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path)
            .await
            .map_err(ServerError::Database)?;

        if config.seed_demo_data {
            let seeded = seed::seed_demo_data(&db.pool)
                .await
                .map_err(|e| ServerError::Database(e.into()))?;
            if seeded {
                tracing::info!("Demo organization loaded");
            } else {
                tracing::info!("Store not empty, demo data skipped");
            }
        }

        Ok(Self::new(config.clone(), db))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
