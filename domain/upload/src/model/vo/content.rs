use bytes::Bytes;

use crate::model::vo::{Access, ItemMetadata};

/// What backs a new item.
#[derive(Debug, Clone)]
pub enum ItemContent {
    /// Binary payload uploaded in parts, processed asynchronously after commit.
    Payload(Bytes),
    /// Remote content fetched and processed asynchronously by the service.
    Url(String),
    /// Inline text stored synchronously.
    Text(String),
}

impl ItemContent {
    /// Whether the service processes the item after creation and it has to be polled.
    pub fn needs_processing(&self) -> bool {
        matches!(self, ItemContent::Payload(_) | ItemContent::Url(_))
    }
}

/// Everything needed to publish one item.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub owner: String,
    pub metadata: ItemMetadata,
    pub content: ItemContent,
    pub access: Access,
}
