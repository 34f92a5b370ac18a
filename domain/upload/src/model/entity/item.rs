use serde::{Deserialize, Serialize};

use crate::model::vo::ItemStatus;

/// Local handle of an item owned by the remote content service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Item id assigned by the service on creation.
    pub id: String,
    /// User that owns the item.
    pub owner: String,
}

impl ItemRef {
    pub fn new(id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
        }
    }
}

/// Remote item as last observed by the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: String,
    pub owner: String,
    pub status: ItemStatus,
}

impl RemoteItem {
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(&self.id, &self.owner)
    }
}
