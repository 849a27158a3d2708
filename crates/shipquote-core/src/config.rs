//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_timeout() -> u64 {
    30
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (required for the postgres catalog backend)
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Where rate tables are stored
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogBackend {
    /// PostgreSQL via sqlx
    Postgres,
    /// Process-local catalog, lost on restart
    Memory,
}

impl Default for CatalogBackend {
    fn default() -> Self {
        Self::Postgres
    }
}

/// Rate catalog configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Storage backend for rates and rate bands
    #[serde(default)]
    pub backend: CatalogBackend,

    /// Load the standard rate tables when the server starts
    #[serde(default)]
    pub seed_on_startup: bool,

    /// Apply embedded schema migrations before serving (postgres only)
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: CatalogBackend::default(),
            seed_on_startup: false,
            run_migrations: default_run_migrations(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults shared by every loading path
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("server.timeout_secs", default_timeout() as i64)?
            .set_default("database.max_connections", i64::from(default_max_connections()))?
            .set_default("database.min_connections", i64::from(default_min_connections()))?
            .set_default("database.acquire_timeout_secs", default_acquire_timeout() as i64)?
            .set_default("database.idle_timeout_secs", default_idle_timeout() as i64)?
            .set_default("catalog.backend", "postgres")?
            .set_default("catalog.seed_on_startup", false)?
            .set_default("catalog.run_migrations", default_run_migrations())
    }

    /// Load configuration from environment and optional config files
    ///
    /// Sources, later ones winning: defaults, `config/default`,
    /// `config/{RUN_MODE}`, then `SHIPQUOTE__SECTION__KEY` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("SHIPQUOTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.fill_database_url();
        Ok(app_config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("SHIPQUOTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.fill_database_url();
        Ok(app_config)
    }

    // DATABASE_URL is the conventional variable for sqlx tooling
    fn fill_database_url(&mut self) {
        if self.database.url.is_none() {
            self.database.url = env::var("DATABASE_URL").ok();
        }
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
