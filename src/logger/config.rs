use std::fmt;
use std::io::{Error, ErrorKind};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::ChronoLocal;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Supported log format types
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => write!(f, "plain"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

/// Builds the filter from RUST_LOG when set, otherwise from the configured level
fn build_filter(log_level: &str) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level).map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid log level"))
}

/// Builds a subscriber whose every line carries timestamp, level, target and message
fn build_subscriber<W>(filter: EnvFilter, format: LogFormat, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // target = имя логгера
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()));

    match format {
        LogFormat::Json => Box::new(builder.json().finish()),
        LogFormat::Plain => Box::new(builder.finish()),
    }
}

/// Installs the global subscriber writing to stdout
pub fn init_logger(log_level: &str, log_format: &str) -> Result<(), Error> {
    let filter = build_filter(log_level)?;
    let subscriber = build_subscriber(filter, LogFormat::from(log_format), std::io::stdout);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::new(ErrorKind::AlreadyExists, e.to_string()))
}
