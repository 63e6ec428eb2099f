use std::time::Duration;

/// Process configuration, read once at startup from the environment
/// (`.env` is loaded first by main).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub cedict_path: String,
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,
    pub http_timeout: Duration,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "flashcards.db".into()),
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".into()),
            cedict_path: std::env::var("CEDICT_PATH")
                .unwrap_or_else(|_| "data/cedict_ts.u8".into()),
            deepseek_api_key: std::env::var("DEEPSEEK_API_KEY").ok(),
            deepseek_base_url: std::env::var("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".into()),
            http_timeout: Duration::from_secs(timeout_secs),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }
}
