use std::{sync::Arc, time::Duration};

use domain_upload::service::{ContentService, ReadinessService, UploadService};
use infrastructure_content::ContentServiceClient;
use service_upload::{ReadinessPollServiceImpl, UploadServiceImpl};

use crate::config::UploaderConfig;

pub struct ServiceProvider {
    pub content_service: Arc<dyn ContentService>,
    pub upload_service: Arc<dyn UploadService>,
}

impl ServiceProvider {
    pub fn build(config: &UploaderConfig) -> anyhow::Result<Self> {
        let mut client = reqwest::Client::builder();
        if config.content.request_timeout_ms > 0 {
            client = client.timeout(Duration::from_millis(config.content.request_timeout_ms));
        }
        let content_service: Arc<dyn ContentService> = Arc::new(ContentServiceClient::new(
            client.build()?,
            &config.content.base_url,
            config.content.token.to_owned(),
        )?);

        let readiness_service: Arc<dyn ReadinessService> = Arc::new(
            ReadinessPollServiceImpl::builder()
                .content_service(content_service.clone())
                .interval(Duration::from_millis(config.upload.poll_interval_ms))
                .max_attempts(config.upload.max_poll_attempts)
                .build(),
        );
        let upload_service: Arc<dyn UploadService> = Arc::new(
            UploadServiceImpl::builder()
                .content_service(content_service.clone())
                .readiness_service(readiness_service)
                .part_size(config.upload.part_size_bytes)
                .concurrency(config.upload.upload_concurrency)
                .build(),
        );

        Ok(Self {
            content_service,
            upload_service,
        })
    }
}
