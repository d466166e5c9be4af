use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub environment: Environment,
    pub looker: LookerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for the BI reporting service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookerConfig {
    pub base_url: String,
    /// Identity endpoint; falls back to `{base_url}/login` when unset
    pub auth_url: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub format: String,
    pub limit: u32,
    pub timeout_secs: u64,
    /// Attach the bearer header to GET report runs as well as POST queries
    pub authorize_get: bool,
    pub queries: QueryIds,
}

/// Named saved-query identifiers used by the convenience lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryIds {
    pub reg_stats: u64,
}

impl LookerConfig {
    pub fn auth_url(&self) -> String {
        match &self.auth_url {
            Some(url) => url.clone(),
            None => format!("{}/login", self.base_url.trim_end_matches('/')),
        }
    }
}

impl ReportsConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LOOKER_BASE_URL") {
            self.looker.base_url = v;
        }
        if let Ok(v) = env::var("LOOKER_AUTH_URL") {
            self.looker.auth_url = Some(v);
        }
        if let Ok(v) = env::var("LOOKER_CLIENT_ID") {
            self.looker.client_id = v;
        }
        if let Ok(v) = env::var("LOOKER_CLIENT_SECRET") {
            self.looker.client_secret = v;
        }
        if let Ok(v) = env::var("LOOKER_FORMAT") {
            self.looker.format = v;
        }
        if let Ok(v) = env::var("LOOKER_LIMIT") {
            self.looker.limit = v.parse().unwrap_or(self.looker.limit);
        }
        if let Ok(v) = env::var("LOOKER_TIMEOUT_SECS") {
            self.looker.timeout_secs = v.parse().unwrap_or(self.looker.timeout_secs);
        }
        if let Ok(v) = env::var("LOOKER_AUTHORIZE_GET") {
            self.looker.authorize_get = v.parse().unwrap_or(self.looker.authorize_get);
        }
        if let Ok(v) = env::var("LOOKER_QUERY_REG_STATS") {
            self.looker.queries.reg_stats = v.parse().unwrap_or(self.looker.queries.reg_stats);
        }

        self
    }

    /// Baseline settings shared by every environment
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            environment: Environment::Development,
            looker: LookerConfig {
                base_url: base_url.into(),
                auth_url: None,
                client_id: String::new(),
                client_secret: String::new(),
                format: "json".to_string(),
                limit: 5000,
                timeout_secs: 30,
                authorize_get: false,
                queries: QueryIds { reg_stats: 1234 },
            },
        }
    }

    fn development() -> Self {
        Self::with_base_url("http://localhost:19999/api/3.1")
    }

    fn staging() -> Self {
        let mut config = Self::with_base_url("http://localhost:19999/api/3.1");
        config.environment = Environment::Staging;
        config.looker.timeout_secs = 15;
        config
    }

    fn production() -> Self {
        let mut config = Self::with_base_url("http://localhost:19999/api/3.1");
        config.environment = Environment::Production;
        config.looker.timeout_secs = 10;
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ReportsConfig> = Lazy::new(ReportsConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static ReportsConfig {
    &CONFIG
}
