use std::env;

/// Config holds all seeder configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub inventory_url: String,
    pub inventory_token: String,
    pub branch: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            inventory_url: get_env("INVENTORY_URL", "http://localhost:8000"),
            inventory_token: get_env("INVENTORY_TOKEN", ""),
            branch: get_env("BRANCH", "main"),
            request_timeout_secs: get_env("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or(30),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
