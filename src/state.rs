use crate::config::AppConfig;
use crate::db;
use anyhow::Context;
use sqlx::SqlitePool;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;

        let templates = Tera::new(&config.templates_glob)
            .with_context(|| format!("load templates from {}", config.templates_glob))?;
        tracing::debug!(count = templates.get_template_names().count(), "templates loaded");

        Ok(Self::from_parts(db, config, Arc::new(templates)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, templates: Arc<Tera>) -> Self {
        Self {
            db,
            config,
            templates,
        }
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        use crate::config::ServerConfig;

        let templates_glob = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            templates_glob: templates_glob.into(),
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
        });
        let templates = Tera::new(templates_glob).expect("templates should parse");
        Self::from_parts(db::memory().await, config, Arc::new(templates))
    }
}
