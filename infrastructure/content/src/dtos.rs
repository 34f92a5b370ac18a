use anyhow::Context;
use domain_upload::model::vo::{Access, ItemMetadata, ItemStatus};
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemResponse {
    #[serde(default)]
    pub success: bool,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl From<StatusResponse> for ItemStatus {
    fn from(value: StatusResponse) -> Self {
        ItemStatus::parse(&value.status, value.status_message)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    #[serde(default)]
    pub not_shared_with: Vec<String>,
}

/// The service answers errors with HTTP 200 and an `error` object in the body.
pub fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> anyhow::Result<T> {
    if let Some(error) = body.get("error") {
        let error: ApiError =
            serde_json::from_value(error.clone()).context("malformed error response")?;
        match error.code {
            Some(code) => anyhow::bail!("{} (code {code}) {:?}", error.message, error.details),
            None => anyhow::bail!("{} {:?}", error.message, error.details),
        }
    }
    Ok(serde_json::from_value(body)?)
}

/// Form fields describing an item.
pub fn metadata_fields(metadata: &ItemMetadata) -> anyhow::Result<Vec<(&'static str, String)>> {
    let mut fields = vec![
        ("title", metadata.title.to_owned()),
        ("type", metadata.item_type.to_owned()),
    ];
    if let Some(description) = &metadata.description {
        fields.push(("description", description.to_owned()));
    }
    if let Some(snippet) = &metadata.snippet {
        fields.push(("snippet", snippet.to_owned()));
    }
    if !metadata.tags.is_empty() {
        fields.push(("tags", metadata.tags.join(",")));
    }
    if !metadata.type_keywords.is_empty() {
        fields.push(("typeKeywords", metadata.type_keywords.join(",")));
    }
    if let Some(extent) = &metadata.extent {
        fields.push(("extent", extent.to_service_string()));
    }
    if let Some(properties) = &metadata.properties {
        fields.push(("properties", serde_json::to_string(properties)?));
    }
    Ok(fields)
}

pub fn share_fields(access: Access) -> Vec<(&'static str, String)> {
    let (everyone, org) = match access {
        Access::Private => (false, false),
        Access::Org => (false, true),
        Access::Public => (true, true),
    };
    vec![("everyone", everyone.to_string()), ("org", org.to_string())]
}
