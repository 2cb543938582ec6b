//! Database connection pool management
//!
//! Provides database pool creation and configuration for the catalog backend

mod metrics;

use metrics::update_pool_metrics;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for metrics labeling
    pub service_name: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection creation timeout (new connection to PostgreSQL)
    pub connect_timeout_secs: u64,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl DbConfig {
    /// Build a config for `database_url`, reading pool tuning from `DB_*`
    /// environment variables and falling back to the defaults.
    pub fn from_env(service_name: &str, database_url: &str, max_connections: u32) -> Self {
        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            database_url: database_url.to_string(),
            max_connections: env_or("DB_MAX_CONNECTIONS", max_connections),
            min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout_secs),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs),
        }
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.max_connections,
            self.min_connections,
            self.connect_timeout_secs,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs
        );
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// How often pool gauges are refreshed after start-up
const METRICS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Pool options derived from `config`; no connection is opened.
fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Round-trip a `SELECT 1` within `timeout`.
async fn verify(pool: &PgPool, timeout: Duration) -> Result<(), sqlx::Error> {
    match tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(result) => result.map(|_| ()),
        Err(_) => Err(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("database did not answer within {}s", timeout.as_secs()),
        ))),
    }
}

/// Keep the pool gauges current until the pool is closed.
fn spawn_metrics_refresher(pool: PgPool, service: String) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_REFRESH_INTERVAL);
        loop {
            interval.tick().await;
            if pool.is_closed() {
                debug!(service = %service, "Pool closed, stopping metrics refresher");
                break;
            }
            update_pool_metrics(&pool, &service);
        }
    });
}

/// Open a verified PostgreSQL pool and start publishing its gauges.
///
/// Fails when the server cannot be reached or does not answer a trivial
/// query within `connect_timeout_secs`.
pub async fn create_pool(config: DbConfig) -> Result<PgPool, sqlx::Error> {
    debug!(config = ?config, "Opening database pool");

    let pool = pool_options(&config)
        .connect(&config.database_url)
        .await?;

    if let Err(e) = verify(&pool, Duration::from_secs(config.connect_timeout_secs)).await {
        error!(
            service = %config.service_name,
            error = %e,
            "Database connection verification failed"
        );
        pool.close().await;
        return Err(e);
    }

    info!(service = %config.service_name, "Database pool ready");
    update_pool_metrics(&pool, &config.service_name);
    spawn_metrics_refresher(pool.clone(), config.service_name);

    Ok(pool)
}
