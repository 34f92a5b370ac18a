use serde::Deserialize;
use tracing::metadata::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Logging configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct TelemetryConfig {
    #[serde(default = "TelemetryConfig::default_enable")]
    pub enable: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// Extra `EnvFilter` directives, e.g. `service_upload=trace`.
    #[serde(default)]
    pub level_filter: String,
    /// Print file, line, thread and target of each event.
    #[serde(default)]
    pub enable_debug_logging: bool,
}

impl TelemetryConfig {
    fn default_enable() -> bool {
        true
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: Self::default_enable(),
            max_level: Default::default(),
            level_filter: Default::default(),
            enable_debug_logging: false,
        }
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.max_level.clone()).into())
        .parse_lossy(config.level_filter.as_str());
    let debug = config.enable_debug_logging;
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(debug)
        .with_line_number(debug)
        .with_thread_ids(debug)
        .with_target(debug)
        .with_filter(filter);
    Registry::default().with(console).try_init()?;
    Ok(())
}
