//! Typed configuration surface, loaded once at process startup.
//!
//! Both `hive-api` and `hive-jobs` call [`Config::from_env`] after
//! `dotenvy::dotenv().ok()`.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_connection: String,
    pub jwt_secret_base64: String,
    pub broker: BrokerConfig,
    pub reservation_hold_window: Duration,
    pub expiry_tick_interval: Duration,
    pub outbox: OutboxConfig,
    pub seat_map_cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub virtual_host: String,
}

#[derive(Debug, Clone)]
pub struct OutboxConfig {
    pub batch_size: i64,
    pub tick_interval: Duration,
    pub stuck_timeout: Duration,
    pub max_retries: i32,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            tick_interval: Duration::from_secs(10),
            stuck_timeout: Duration::from_secs(5 * 60),
            max_retries: 5,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_duration_secs(key: &str, default_secs: u64) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_connection =
            std::env::var("STORAGE_CONNECTION").expect("STORAGE_CONNECTION must be set");
        let jwt_secret_base64 = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let broker = BrokerConfig {
            host: env_or("BROKER_HOST", "localhost"),
            port: env_or("BROKER_PORT", "5672").parse()?,
            username: env_or("BROKER_USERNAME", "guest"),
            password: env_or("BROKER_PASSWORD", "guest"),
            virtual_host: env_or("BROKER_VIRTUAL_HOST", "/"),
        };

        let outbox = OutboxConfig {
            batch_size: env_or("OUTBOX_BATCH_SIZE", "50").parse()?,
            tick_interval: env_duration_secs("OUTBOX_TICK_INTERVAL_SECS", 10),
            stuck_timeout: env_duration_secs("OUTBOX_STUCK_TIMEOUT_SECS", 5 * 60),
            max_retries: env_or("OUTBOX_MAX_RETRIES", "5").parse()?,
        };

        Ok(Self {
            storage_connection,
            jwt_secret_base64,
            broker,
            reservation_hold_window: env_duration_secs("RESERVATION_HOLD_WINDOW_SECS", 10 * 60),
            expiry_tick_interval: env_duration_secs("EXPIRY_TICK_INTERVAL_SECS", 60),
            outbox,
            seat_map_cache_ttl: env_duration_secs("SEAT_MAP_CACHE_TTL_SECS", 60),
        })
    }
}
