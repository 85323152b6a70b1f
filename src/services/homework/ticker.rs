// File: src/services/homework/ticker.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Pause between poll iterations
#[async_trait]
pub trait TraitTicker {
    async fn sleep(&self, period: Duration);
}

/// Source of the poll cursor, seconds since epoch
pub trait TraitClock {
    fn now(&self) -> i64;
}

pub struct TokioTicker;

#[async_trait]
impl TraitTicker for TokioTicker {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

pub struct SystemClock;

impl TraitClock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

// Форматирование курсора в удобочитаемую строку
pub fn format_cursor(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
