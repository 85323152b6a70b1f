// File: src/services/practicum/validator.rs
use super::models::{HomeworkRecord, HomeworkStatus};
use crate::error::{DomainError, Result, ShapeError};
use serde_json::Value;
use tracing::error;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";
pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Проверяет ответ API на соответствие документации и возвращает список работ
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(body) = response.as_object() else {
        error!("Response не является словарем: {}", response);
        return Err(ShapeError::NotAnObject.into());
    };

    let Some(homeworks) = body.get(HOMEWORKS_KEY) else {
        error!("В ответе API отсутствует ключ {}: {}", HOMEWORKS_KEY, response);
        return Err(ShapeError::MissingKey(HOMEWORKS_KEY).into());
    };

    if !body.contains_key(CURRENT_DATE_KEY) {
        error!("В ответе API отсутствует ключ {}: {}", CURRENT_DATE_KEY, response);
        return Err(ShapeError::MissingKey(CURRENT_DATE_KEY).into());
    }

    match homeworks.as_array() {
        Some(list) => Ok(list.as_slice()),
        None => {
            error!("Неверный тип данных у элемента homeworks: {}", homeworks);
            Err(ShapeError::HomeworksNotAList.into())
        }
    }
}

/// Extracts name and status from a single homework record
pub fn parse_homework(homework: &Value) -> Result<HomeworkRecord> {
    let name = homework
        .get(HOMEWORK_NAME_KEY)
        .ok_or(DomainError::MissingField(HOMEWORK_NAME_KEY))?;
    let homework_name = name
        .as_str()
        .ok_or(DomainError::InvalidField(HOMEWORK_NAME_KEY))?
        .to_string();

    let status = homework
        .get(STATUS_KEY)
        .ok_or(DomainError::MissingField(STATUS_KEY))?;
    let status = match status.as_str() {
        Some(raw) => raw.parse::<HomeworkStatus>()?,
        None => return Err(DomainError::UnknownStatus(status.to_string()).into()),
    };

    Ok(HomeworkRecord {
        homework_name,
        status,
    })
}

/// Проверяет статус работы и возвращает строку для сообщения
pub fn parse_status(homework: &Value) -> Result<String> {
    parse_homework(homework)
        .map(|record| record.status_message())
        .inspect_err(|e| error!("Некорректная запись о работе ({}): {}", e, homework))
}
