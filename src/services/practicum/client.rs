// File: src/services/practicum/client.rs
use crate::env_config::models::app_setting::AppSettings;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error, info};

/// Source of homework statuses
#[async_trait]
pub trait TraitHomeworkApi {
    /// Returns the raw JSON body for submissions updated since `from_date`
    async fn get_api_answer(&self, from_date: i64) -> Result<Value>;
}

pub struct PracticumApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumApiClient {
    pub fn new(settings: &AppSettings) -> std::result::Result<Self, reqwest::Error> {
        let practicum = &settings.app_config.practicum;

        let mut builder = Client::builder();
        if let Some(timeout) = practicum.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!("Practicum API client configured for {}", practicum.endpoint);

        Ok(Self {
            client,
            endpoint: practicum.endpoint.clone(),
            token: settings.app_env.credentials.practicum_token.clone(),
        })
    }
}

#[async_trait]
impl TraitHomeworkApi for PracticumApiClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        debug!("Requesting homework statuses from_date={}", from_date);

        // without_url: в URL меняется from_date, ошибки должны сравниваться по значению
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::transport(None, e.without_url().to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Эндпоинт {} не доступен, статус {}", self.endpoint, status);
            return Err(BotError::transport(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Failed to decode homework API response: {}", e);
            BotError::transport(None, format!("некорректный JSON в ответе: {}", e.without_url()))
        })
    }
}
