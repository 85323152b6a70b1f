// Test doubles for the poller's collaborators
use crate::app_state::models::AppState;
use crate::env_config::models::app_config::AppConfig;
use crate::env_config::models::app_env::{AppEnv, Env};
use crate::env_config::models::app_setting::AppSettings;
use crate::env_config::models::credentials::Credentials;
use crate::error::{BotError, NotifyError, Result};
use crate::services::homework::ticker::{TraitClock, TraitTicker};
use crate::services::practicum::client::TraitHomeworkApi;
use crate::services::telegram::client::TraitMessenger;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Replays queued answers, repeating the last one when the queue runs dry
#[derive(Default)]
pub struct FakeHomeworkApi {
    answers: Mutex<VecDeque<Result<Value>>>,
    last: Mutex<Option<Result<Value>>>,
    requested: Mutex<Vec<i64>>,
}

impl FakeHomeworkApi {
    pub fn new(answers: Vec<Result<Value>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    pub fn requested_from_dates(&self) -> Vec<i64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TraitHomeworkApi for FakeHomeworkApi {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        self.requested.lock().unwrap().push(from_date);

        let next = self.answers.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(answer) = next {
            *last = Some(answer);
        }
        last.clone()
            .unwrap_or_else(|| Err(BotError::transport(None, "no answer queued")))
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<String>>,
    attempts: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingMessenger {
    pub fn failing() -> Self {
        let messenger = Self::default();
        messenger.set_failing(true);
        messenger
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages that were delivered
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Every send attempt, delivered or not
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TraitMessenger for RecordingMessenger {
    async fn send_message(&self, text: &str) -> std::result::Result<(), NotifyError> {
        self.attempts.lock().unwrap().push(text.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Rejected {
                status: 400,
                description: "Bad Request: chat not found".to_string(),
            });
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingTicker {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingTicker {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl TraitTicker for RecordingTicker {
    async fn sleep(&self, period: Duration) {
        self.sleeps.lock().unwrap().push(period);
        tokio::task::yield_now().await;
    }
}

/// Clock that moves forward by `step` seconds on every read
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }
}

impl TraitClock for ManualClock {
    fn now(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

pub fn test_settings() -> AppSettings {
    AppSettings {
        app_config: AppConfig::default(),
        app_env: AppEnv {
            env: Env::Local,
            credentials: Credentials {
                practicum_token: "practicum-token".to_string(),
                telegram_token: "telegram-token".to_string(),
                telegram_chat_id: "42".to_string(),
            },
        },
    }
}

pub struct TestHarness {
    pub api: Arc<FakeHomeworkApi>,
    pub messenger: Arc<RecordingMessenger>,
    pub ticker: Arc<RecordingTicker>,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    /// Clock starts at 1000 and advances 600 seconds per read
    pub fn new(answers: Vec<Result<Value>>, messenger: RecordingMessenger) -> Self {
        let api = Arc::new(FakeHomeworkApi::new(answers));
        let messenger = Arc::new(messenger);
        let ticker = Arc::new(RecordingTicker::default());
        let app_state = Arc::new(AppState::new(
            Arc::new(test_settings()),
            api.clone(),
            messenger.clone(),
            ticker.clone(),
            Arc::new(ManualClock::new(1000, 600)),
        ));

        Self {
            api,
            messenger,
            ticker,
            app_state,
        }
    }
}

/// Serves one canned HTTP response on a local port.
///
/// The join handle yields the raw request text (head and body).
pub async fn spawn_http_stub(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

/// Address nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
