// File: src/services/telegram/client.rs
use crate::env_config::models::app_setting::AppSettings;
use crate::error::NotifyError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Telegram caps a single message at 4096 characters
const MAX_MESSAGE_CHARS: usize = 4096;

/// Delivers text to the configured chat
#[async_trait]
pub trait TraitMessenger {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Deserialize)]
struct TgResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramBot {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(settings: &AppSettings) -> Result<Self, reqwest::Error> {
        let credentials = &settings.app_env.credentials;
        let client = Client::builder().build()?;
        let api_url = settings
            .app_config
            .telegram
            .api_url
            .trim_end_matches('/')
            .to_string();

        info!("Telegram bot configured for chat {}", credentials.telegram_chat_id);

        Ok(Self {
            client,
            api_url,
            token: credentials.telegram_token.clone(),
            chat_id: credentials.telegram_chat_id.clone(),
        })
    }

    async fn send_chunk(&self, chunk: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": chunk,
        });

        // without_url: токен бота входит в URL и не должен попадать в логи
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.without_url()))?;

        let status = response.status();
        let body: TgResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.without_url()))?;

        if !status.is_success() || !body.ok {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: body
                    .description
                    .unwrap_or_else(|| "sendMessage failed".to_string()),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl TraitMessenger for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        for chunk in split_message(text) {
            self.send_chunk(&chunk).await?;
        }
        debug!("Message delivered to chat {}", self.chat_id);
        Ok(())
    }
}

/// Splits text into Telegram-sized pieces on character boundaries
fn split_message(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(MAX_MESSAGE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
