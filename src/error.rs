//! Error types for the homework status bot

use thiserror::Error;

/// Result type alias for poller operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Errors raised while configuring or running one poll iteration.
///
/// Values are comparable so the poller can tell a repeated failure from a new one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// Required credentials are missing from the environment
    #[error("Отсутствуют переменные окружения: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The homework API could not be reached or answered with a non-200 status
    #[error("Эндпоинт не доступен{}: {message}", status_suffix(.status))]
    Transport {
        /// HTTP status code, absent for network-level failures
        status: Option<u16>,
        message: String,
    },

    /// The API response does not match the documented shape
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A homework record is missing data or carries an unknown status
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Response не является словарем")]
    NotAnObject,

    #[error("В ответе API отсутствует ключ {0}")]
    MissingKey(&'static str),

    #[error("Неверный тип данных у элемента homeworks")]
    HomeworksNotAList,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("В ответе API нет ключа {0}")]
    MissingField(&'static str),

    #[error("Неверный тип данных у ключа {0}")]
    InvalidField(&'static str),

    #[error("Получен неизвестный статус работы: {0}")]
    UnknownStatus(String),
}

/// Failure to deliver a message through the messenger.
///
/// Never propagated out of the notify path.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("sendMessage request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("sendMessage rejected (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

impl BotError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}
