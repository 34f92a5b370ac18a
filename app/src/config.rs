use std::path::PathBuf;

use serde::Deserialize;

use crate::telemetry::TelemetryConfig;

#[derive(Default, Clone, Deserialize, Debug)]
pub struct UploaderConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Where the content service lives.
#[derive(Clone, Deserialize, Debug)]
pub struct ContentConfig {
    #[serde(default = "ContentConfig::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Timeout of a single request, 0 disables it.
    #[serde(default = "ContentConfig::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ContentConfig {
    fn default_base_url() -> String {
        "http://localhost/sharing/rest".to_string()
    }
    fn default_request_timeout_ms() -> u64 {
        0
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            token: None,
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Tunables of the upload pipeline.
#[derive(Clone, Deserialize, Debug)]
pub struct UploadConfig {
    #[serde(default = "UploadConfig::default_part_size_bytes")]
    pub part_size_bytes: usize,
    #[serde(default = "UploadConfig::default_upload_concurrency")]
    pub upload_concurrency: usize,
    #[serde(default = "UploadConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give up waiting for processing after this many status checks. Unbounded when unset.
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,
}

impl UploadConfig {
    fn default_part_size_bytes() -> usize {
        service_upload::DEFAULT_PART_SIZE
    }
    fn default_upload_concurrency() -> usize {
        service_upload::DEFAULT_CONCURRENCY
    }
    fn default_poll_interval_ms() -> u64 {
        service_upload::DEFAULT_POLL_INTERVAL.as_millis() as u64
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            part_size_bytes: Self::default_part_size_bytes(),
            upload_concurrency: Self::default_upload_concurrency(),
            poll_interval_ms: Self::default_poll_interval_ms(),
            max_poll_attempts: None,
        }
    }
}

/// Layered configuration: `config.yaml` in the working directory, the files
/// given on the command line, then `UPLOADER__*` environment variables.
pub fn build_config(files: &[PathBuf]) -> anyhow::Result<UploaderConfig> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name("config")
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for file in files {
        config = config.add_source(
            config::File::from(file.as_path())
                .format(config::FileFormat::Yaml)
                .required(true),
        );
    }
    config = config.add_source(
        config::Environment::with_prefix("UPLOADER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(config.build()?.try_deserialize()?)
}
