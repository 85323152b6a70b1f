use crate::env_config::models::app_setting::AppSettings;
use crate::services::homework::ticker::{TraitClock, TraitTicker};
use crate::services::practicum::client::TraitHomeworkApi;
use crate::services::telegram::client::TraitMessenger;

use std::sync::Arc;

pub struct AppState {
    pub settings: Arc<AppSettings>,
    pub homework_api: Arc<dyn TraitHomeworkApi + Send + Sync>,
    pub messenger: Arc<dyn TraitMessenger + Send + Sync>,
    pub ticker: Arc<dyn TraitTicker + Send + Sync>,
    pub clock: Arc<dyn TraitClock + Send + Sync>,
}

impl AppState {
    pub fn new(
        settings: Arc<AppSettings>,
        homework_api: Arc<dyn TraitHomeworkApi + Send + Sync>,
        messenger: Arc<dyn TraitMessenger + Send + Sync>,
        ticker: Arc<dyn TraitTicker + Send + Sync>,
        clock: Arc<dyn TraitClock + Send + Sync>,
    ) -> Self {
        Self {
            settings,
            homework_api,
            messenger,
            ticker,
            clock,
        }
    }
}
