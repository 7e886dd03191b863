//! Application configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file by the server binary) and validated before the server starts.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_PORT` | `5001` |
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `JWT_SECRET` | development secret, rejected when `APP_ENV=production` |
//! | `TOKEN_TTL_DAYS` | `7` (1 to 365) |
//! | `BCRYPT_COST` | `10` |
//! | `STATIC_DIR` | `public` |

use thiserror::Error;

/// Secret used when `JWT_SECRET` is absent outside production
pub const DEVELOPMENT_JWT_SECRET: &str = "chatmates-development-secret";

/// Longest accepted session lifetime
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub server_port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in days
    pub token_ttl_days: i64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Whether the server runs in production mode (secure cookies, strict secret)
    pub production: bool,
    /// Directory with the frontend's built assets
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 5001,
            database_url: None,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_days: 7,
            bcrypt_cost: 10,
            production: false,
            static_dir: "public".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(port) = env_var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.server_port(port);
        }
        if let Some(url) = env_var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = env_var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(days) = env_var("TOKEN_TTL_DAYS") {
            let days = days
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_TTL_DAYS", days))?;
            builder = builder.token_ttl_days(days);
        }
        if let Some(cost) = env_var("BCRYPT_COST") {
            let cost = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("BCRYPT_COST", cost))?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(env) = env_var("APP_ENV") {
            builder = builder.production(env.eq_ignore_ascii_case("production"));
        }
        if let Some(dir) = env_var("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.production && self.jwt_secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_DAYS",
                self.token_ttl_days.to_string(),
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST",
                self.bcrypt_cost.to_string(),
            ));
        }
        Ok(())
    }

    /// Session token lifetime in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_days.saturating_mul(24 * 60 * 60)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_days: Option<i64>,
    bcrypt_cost: Option<u32>,
    production: Option<bool>,
    static_dir: Option<String>,
}

impl AppConfigBuilder {
    /// Set the listening port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the token lifetime
    pub fn token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = Some(days);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Toggle production mode
    pub fn production(mut self, production: bool) -> Self {
        self.production = Some(production);
        self
    }

    /// Set the static asset directory
    pub fn static_dir(mut self, dir: impl Into<String>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url.or(defaults.database_url),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_days: self.token_ttl_days.unwrap_or(defaults.token_ttl_days),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            production: self.production.unwrap_or(defaults.production),
            static_dir: self.static_dir.unwrap_or(defaults.static_dir),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
