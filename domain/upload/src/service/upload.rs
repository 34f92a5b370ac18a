use async_trait::async_trait;

use crate::exception::UploadResult;
use crate::model::entity::RemoteItem;
use crate::model::vo::UploadRequest;

/// # Upload service
///
/// Publishes an item: creates it, uploads its content, and waits until the
/// service has processed it.
///
/// A multipart upload is all-or-nothing. When a part or the commit fails the
/// upload is canceled on the service and the original error is returned.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> UploadResult<RemoteItem>;
}
