use super::models::app_env::{AppEnv, Env};
use super::models::credentials::{Credentials, PRACTICUM_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_TOKEN};
use crate::error::{BotError, Result};
use std::env;
use std::str::FromStr;
use tracing::error;

impl AppEnv {
    /// Reads the environment selector and the required credentials from the process environment
    pub fn new() -> Result<AppEnv> {
        Ok(AppEnv {
            env: read_env_selector(),
            credentials: validate_credentials(get_env_var)?,
        })
    }
}

/// ENV is optional and falls back to `local`
pub fn read_env_selector() -> Env {
    get_env_var("ENV")
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| Env::from_str(&raw).unwrap_or_else(|e| panic!("ENV -> {}", e)))
        .unwrap_or(Env::Local)
}

/// Checks that every credential is present and non-empty.
///
/// Each missing variable is logged separately; the error lists all of them.
pub fn validate_credentials<F>(lookup: F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let mut take = |name: &'static str| match lookup(name) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            error!("Отсутствует {}, проверьте файл .env", name);
            missing.push(name);
            String::new()
        }
    };

    let practicum_token = take(PRACTICUM_TOKEN);
    let telegram_token = take(TELEGRAM_TOKEN);
    let telegram_chat_id = take(TELEGRAM_CHAT_ID);

    if !missing.is_empty() {
        return Err(BotError::Configuration { missing });
    }

    Ok(Credentials {
        practicum_token,
        telegram_token,
        telegram_chat_id,
    })
}

fn get_env_var(name: &str) -> Option<String> {
    env::var(name).ok()
}
