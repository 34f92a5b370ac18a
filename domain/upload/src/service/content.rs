use async_trait::async_trait;
use bytes::Bytes;

use crate::command::{CreateItemCommand, CreatedItem};
use crate::model::entity::ItemRef;
use crate::model::vo::{Access, ItemMetadata, ItemStatus};

/// # Content service
///
/// Remote service that owns items. Calls returning `bool` report the
/// service acknowledgment, `Ok(false)` means the service refused the call.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn create_item(&self, command: &CreateItemCommand) -> anyhow::Result<CreatedItem>;

    /// Upload one part of a multipart item.
    async fn add_part(
        &self,
        item: &ItemRef,
        part_number: u64,
        payload: Bytes,
    ) -> anyhow::Result<bool>;

    /// Finalize a multipart item once every part is uploaded.
    async fn commit_upload(&self, item: &ItemRef, metadata: &ItemMetadata)
        -> anyhow::Result<bool>;

    /// Abandon an uncommitted multipart item.
    async fn cancel_upload(&self, item: &ItemRef) -> anyhow::Result<bool>;

    async fn item_status(&self, item: &ItemRef) -> anyhow::Result<ItemStatus>;

    async fn set_item_access(&self, item: &ItemRef, access: Access) -> anyhow::Result<bool>;
}
