mod app_state;
mod env_config;
mod error;
mod logger;
mod services;

use app_state::models::AppState;
use env_config::build_env::read_env_selector;
use env_config::models::{
    app_config::AppConfig,
    app_env::AppEnv,
    app_setting::AppSettings,
};
use services::homework::poller::HomeworkPoller;
use services::homework::ticker::{SystemClock, TokioTicker};
use services::practicum::client::PracticumApiClient;
use services::telegram::client::TelegramBot;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    // Переменные из .env, если файл есть
    dotenv::dotenv().ok();

    // Инициализация приложения
    let settings: Arc<AppSettings> = Arc::new(initialize_application());

    // Подключение клиентов API и Telegram
    let app_state = initialize_clients(settings.clone());

    // Запуск основного цикла
    info!("Бот запущен");
    HomeworkPoller::new(app_state).run().await;
}

/// Инициализирует настройки и логирование приложения
fn initialize_application() -> AppSettings {
    let env = read_env_selector();

    // Конфигурация из config/<env>.toml, при ошибке используются значения по умолчанию
    let (config, config_error) = match AppConfig::new(&env) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err.to_string())),
    };

    logger::init_logger(&config.log.level, &config.log.format)
        .expect("Failed to initialize logger");

    info!("Starting homework status bot...");
    info!("Current environment: {}", env);
    if let Some(err) = config_error {
        warn!("Config for {} not loaded, using defaults: {}", env, err);
    }

    // Проверка токенов до любых сетевых запросов
    let environment = match AppEnv::new() {
        Ok(environment) => environment,
        Err(err) => {
            error!("Программа принудительно остановлена: {}", err);
            std::process::exit(1);
        }
    };

    let app_settings = AppSettings {
        app_config: config,
        app_env: environment,
    };

    if app_settings.app_env.is_local() {
        info!("Running in local development mode");
        debug!("Configuration details: {:#?}", app_settings);
    }

    app_settings
}

/// Создает HTTP клиенты и глобальное состояние приложения
fn initialize_clients(settings: Arc<AppSettings>) -> Arc<AppState> {
    let homework_api = match PracticumApiClient::new(&settings) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build Practicum API client: {}", err);
            panic!("Cannot continue without Practicum API client");
        }
    };

    let telegram_bot = match TelegramBot::new(&settings) {
        Ok(bot) => bot,
        Err(err) => {
            error!("Failed to build Telegram client: {}", err);
            panic!("Cannot continue without Telegram client");
        }
    };

    Arc::new(AppState::new(
        settings,
        Arc::new(homework_api),
        Arc::new(telegram_bot),
        Arc::new(TokioTicker),
        Arc::new(SystemClock),
    ))
}
