use crate::{
    command::{CreateItemCommand, CreatedItem},
    exception::UploadResult,
    model::{
        entity::ItemRef,
        vo::{Access, ItemMetadata, ItemStatus},
    },
    service::{ContentService, ReadinessService},
};
use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;

mock! {
    pub ContentService {}
    #[async_trait]
    impl ContentService for ContentService {
        async fn create_item(&self, command: &CreateItemCommand) -> anyhow::Result<CreatedItem>;
        async fn add_part(
            &self,
            item: &ItemRef,
            part_number: u64,
            payload: Bytes,
        ) -> anyhow::Result<bool>;
        async fn commit_upload(&self, item: &ItemRef, metadata: &ItemMetadata) -> anyhow::Result<bool>;
        async fn cancel_upload(&self, item: &ItemRef) -> anyhow::Result<bool>;
        async fn item_status(&self, item: &ItemRef) -> anyhow::Result<ItemStatus>;
        async fn set_item_access(&self, item: &ItemRef, access: Access) -> anyhow::Result<bool>;
    }
}

mock! {
    pub ReadinessService {}
    #[async_trait]
    impl ReadinessService for ReadinessService {
        async fn wait_until_ready(&self, item: &ItemRef) -> UploadResult<()>;
    }
}
