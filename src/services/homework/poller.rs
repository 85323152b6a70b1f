// File: src/services/homework/poller.rs
use super::ticker::format_cursor;
use crate::app_state::models::AppState;
use crate::error::{BotError, Result};
use crate::services::practicum::validator::{check_response, parse_status};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of a single poll iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A new status message was sent to the chat
    Notified,
    /// The latest status matches the last message sent
    Unchanged,
    /// The API returned no homeworks for the window
    NoUpdates,
    Failed(BotError),
}

pub struct HomeworkPoller {
    app_state: Arc<AppState>,
    cursor: i64,
    last_message: Option<String>,
    last_error: Option<BotError>,
}

impl HomeworkPoller {
    pub fn new(app_state: Arc<AppState>) -> Self {
        let cursor = app_state.clock.now();
        Self {
            app_state,
            cursor,
            last_message: None,
            last_error: None,
        }
    }

    /// Lower bound of the next fetch window
    #[cfg(test)]
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    #[cfg(test)]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    #[cfg(test)]
    pub fn last_error(&self) -> Option<&BotError> {
        self.last_error.as_ref()
    }

    /// Запрашивает статусы работ начиная с `cursor`
    pub async fn fetch_status(&self, cursor: i64) -> Result<Value> {
        let answer = self.app_state.homework_api.get_api_answer(cursor).await;
        if let Err(BotError::Transport { status, .. }) = &answer {
            error!("Эндпоинт не доступен (status: {:?})", status);
        }
        answer
    }

    /// Sends a message, logging and swallowing delivery failures.
    ///
    /// Returns whether the message was delivered.
    pub async fn notify(&self, message: &str) -> bool {
        match self.app_state.messenger.send_message(message).await {
            Ok(()) => {
                debug!("Сообщение отправлено");
                true
            }
            Err(e) => {
                error!("Сообщение не было отправлено - {}", e);
                false
            }
        }
    }

    async fn check_updates(&mut self) -> Result<IterationOutcome> {
        let response = self.fetch_status(self.cursor).await?;
        debug!("Данные запрошены у API");

        let homeworks = check_response(&response)?;
        let Some(latest) = homeworks.first() else {
            debug!("Статусы не обновились на данный момент.");
            return Ok(IterationOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("Статус не изменился: {}", message);
            return Ok(IterationOutcome::Unchanged);
        }

        info!("Новый статус: {}", message);
        self.notify(&message).await;
        self.last_message = Some(message);
        Ok(IterationOutcome::Notified)
    }

    async fn report_failure(&mut self, err: &BotError) {
        let message = format!("Сбой в работе программы: {}", err);
        error!("{}", message);

        if self.last_error.as_ref() == Some(err) {
            debug!("Ошибка повторяется, уведомление не отправлено");
        } else {
            self.notify(&message).await;
        }
        self.last_error = Some(err.clone());
    }

    /// Runs one iteration and advances the cursor whatever the outcome
    pub async fn poll_once(&mut self) -> IterationOutcome {
        debug!(
            "Polling homework statuses from {} ({})",
            self.cursor,
            format_cursor(self.cursor)
        );

        let outcome = match self.check_updates().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.report_failure(&err).await;
                IterationOutcome::Failed(err)
            }
        };

        self.cursor = self.app_state.clock.now();
        outcome
    }

    /// Основной цикл бота, работает до завершения процесса
    pub async fn run(mut self) {
        let retry_period = self.app_state.settings.app_config.practicum.retry_period();
        info!(
            "Starting homework poller with {} second interval",
            retry_period.as_secs()
        );

        loop {
            if let IterationOutcome::Failed(err) = self.poll_once().await {
                warn!("Iteration failed, retrying in {}s: {}", retry_period.as_secs(), err);
            }
            self.app_state.ticker.sleep(retry_period).await;
        }
    }
}
