use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "./memo_board.db";
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Bad numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("MEMO_BOARD_HOST").unwrap_or(defaults.host),
            port: parse_or("MEMO_BOARD_PORT", lookup("MEMO_BOARD_PORT"), defaults.port),
            database_path: lookup("MEMO_BOARD_DB_PATH").unwrap_or(defaults.database_path),
            pool_size: parse_or(
                "MEMO_BOARD_POOL_SIZE",
                lookup("MEMO_BOARD_POOL_SIZE"),
                defaults.pool_size,
            )
            .max(1),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(s) => match s.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("{} must be a valid number (got {:?}), using {}", key, s, default);
                default
            }
        },
        None => default,
    }
}
