use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::AppConfig,
    mlb::MlbClient,
    store::{MemoryUserStore, PgUserStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
    pub mlb: MlbClient,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let mlb = MlbClient::new(&config.mlb_base_url);
        Ok(Self {
            store: Arc::new(PgUserStore::new(pool)),
            config,
            mlb,
        })
    }

    /// State over the in-memory store; no database required. The HTTP
    /// integration tests build the router on top of this.
    pub fn in_memory(config: AppConfig) -> Self {
        let mlb = MlbClient::new(&config.mlb_base_url);
        Self {
            store: Arc::new(MemoryUserStore::new()),
            config: Arc::new(config),
            mlb,
        }
    }
}
