use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use domain_upload::{
    exception::{UploadException, UploadResult},
    model::{
        entity::ItemRef,
        vo::{ItemStatus, ReadinessState},
    },
    service::{ContentService, ReadinessService},
};
use typed_builder::TypedBuilder;

/// Default delay before each status request.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Polls an item until the service finished processing it.
///
/// Without `max_attempts` polling never gives up on an item that stays pending.
#[derive(TypedBuilder)]
pub struct ReadinessPollServiceImpl {
    content_service: Arc<dyn ContentService>,
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    interval: Duration,
    #[builder(default)]
    max_attempts: Option<u32>,
}

#[async_trait]
impl ReadinessService for ReadinessPollServiceImpl {
    async fn wait_until_ready(&self, item: &ItemRef) -> UploadResult<()> {
        let mut state = ReadinessState::Waiting;
        let mut attempts = 0u32;
        while !state.is_terminal() {
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(UploadException::ReadinessTimeout {
                    item_id: item.id.to_owned(),
                    attempts,
                });
            }
            tokio::time::sleep(self.interval).await;
            attempts += 1;

            let status = self.content_service.item_status(item).await.map_err(|source| {
                UploadException::StatusQuery {
                    item_id: item.id.to_owned(),
                    source,
                }
            })?;
            match &status {
                ItemStatus::Unrecognized(raw) => {
                    tracing::warn!(item_id = %item.id, status = %raw, "Unrecognized item status, still waiting.")
                }
                _ => tracing::debug!(item_id = %item.id, ?status, attempts, "Polled item status."),
            }
            state = state.advance(&status);
        }

        match state {
            ReadinessState::Failed(message) => Err(UploadException::Readiness {
                item_id: item.id.to_owned(),
                message,
            }),
            _ => Ok(()),
        }
    }
}
