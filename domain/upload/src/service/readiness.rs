use async_trait::async_trait;

use crate::exception::UploadResult;
use crate::model::entity::ItemRef;

#[async_trait]
pub trait ReadinessService: Send + Sync {
    /// Poll the item status until processing completed.
    ///
    /// Error when processing failed.
    async fn wait_until_ready(&self, item: &ItemRef) -> UploadResult<()>;
}
