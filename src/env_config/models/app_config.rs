use super::app_env::Env;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECONDS: u64 = 600;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>, // None - таймаут reqwest по умолчанию
}

#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            format: "plain".to_string(),
        }
    }
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_period_seconds: default_retry_period(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_string()
}

fn default_retry_period() -> u64 {
    DEFAULT_RETRY_PERIOD_SECONDS
}

impl AppConfig {
    /// Loads `config/<env>.toml` relative to the working directory
    pub fn new(env: &Env) -> Result<Self, Box<dyn std::error::Error>> {
        let path = format!("config/{}.toml", env);
        Self::from_file(Path::new(&path))
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AppConfig = toml::from_str(raw)?;
        if config.practicum.retry_period_seconds == 0 {
            return Err("practicum.retry_period_seconds must be greater than zero".into());
        }
        Ok(config)
    }
}

impl PracticumConfig {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_seconds)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}
