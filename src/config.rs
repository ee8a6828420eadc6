use std::env;
use std::time::Duration;

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "sample_mflix";
const DEFAULT_MAX_POOL_SIZE: u32 = 20;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Connection settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub uri: String,
    pub database: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the `MONGODB_*` variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let uri = lookup("MONGODB_URI")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.uri);
        let database = lookup("MONGODB_DATABASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database);

        let max_pool_size = parse_or("MONGODB_MAX_POOL_SIZE", lookup("MONGODB_MAX_POOL_SIZE"), defaults.max_pool_size);
        let min_pool_size = parse_or("MONGODB_MIN_POOL_SIZE", lookup("MONGODB_MIN_POOL_SIZE"), defaults.min_pool_size);
        let mut timeout_secs = parse_or("MONGODB_TIMEOUT_SECS", lookup("MONGODB_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            // timeout zero faz toda operação falhar na seleção de servidor
            log::warn!("⚠️  Invalid value for MONGODB_TIMEOUT_SECS: '0', using default");
            timeout_secs = DEFAULT_TIMEOUT_SECS;
        }

        Self {
            uri,
            database,
            max_pool_size,
            // min acima do max é rejeitado pelo driver
            min_pool_size: min_pool_size.min(max_pool_size),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid value for {}: '{}', using default", key, raw);
            default
        }),
        None => default,
    }
}
