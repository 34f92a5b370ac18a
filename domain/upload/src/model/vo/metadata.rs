use serde::{Deserialize, Serialize};

/// Descriptive fields of an item, sent on create and on commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub type_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    /// Free-form item properties, sent as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl ItemMetadata {
    /// Metadata with the extent rewritten to the string form the service expects.
    pub fn normalized(&self) -> Self {
        Self {
            extent: self.extent.as_ref().map(|e| Extent::Text(e.to_service_string())),
            ..self.clone()
        }
    }
}

/// Geographic extent of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    /// `[[xmin, ymin], [xmax, ymax]]`.
    Corners([[f64; 2]; 2]),
    /// Already formatted `xmin,ymin,xmax,ymax`.
    Text(String),
}

impl Extent {
    pub fn to_service_string(&self) -> String {
        match self {
            Extent::Corners([[xmin, ymin], [xmax, ymax]]) => {
                format!("{xmin},{ymin},{xmax},{ymax}")
            }
            Extent::Text(text) => text.trim().to_owned(),
        }
    }
}
