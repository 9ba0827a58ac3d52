use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub templates_glob: String,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".into());
        let templates_glob =
            std::env::var("TEMPLATES_GLOB").unwrap_or_else(|_| "templates/**/*.html".into());
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: match std::env::var("APP_PORT") {
                Ok(v) => v.parse::<u16>().with_context(|| format!("invalid APP_PORT {v:?}"))?,
                Err(_) => 5001,
            },
        };
        Ok(Self {
            database_url,
            templates_glob,
            server,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            templates_glob: "templates/**/*.html".into(),
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 5001,
            },
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
    }
}
