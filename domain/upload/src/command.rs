use serde::{Deserialize, Serialize};

use crate::model::vo::ItemMetadata;

/// Create an item on the content service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemCommand {
    pub owner: String,
    pub metadata: ItemMetadata,
    /// Content will be sent later in parts.
    pub multipart: bool,
    /// The service processes the content after creation.
    pub r#async: bool,
    /// Remote content the service fetches itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline item body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Identity the service assigned to a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: String,
}
