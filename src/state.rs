use parent_portal_config::{CorsConfig, DatabaseConfig, JwtConfig};
use parent_portal_db::{init_db_pool, run_migrations};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
        }
    }
}

/// Connects to the database (waiting until it is reachable), applies pending
/// migrations and loads the remaining configuration.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&database_config).await;
    run_migrations(&db).await?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
