use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bytes::Bytes;
use domain_upload::{
    command::{CreateItemCommand, CreatedItem},
    model::{
        entity::ItemRef,
        vo::{Access, ItemMetadata, ItemStatus},
    },
    service::ContentService,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::dtos::{
    metadata_fields, parse_body, share_fields, AddItemResponse, ShareResponse, StatusResponse,
    SuccessResponse,
};

/// Content service reached over its REST API.
pub struct ContentServiceClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ContentServiceClient {
    pub fn new(client: reqwest::Client, base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid content base url: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("content base url can not be a base: {base_url}");
        }
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn user_url(&self, owner: &str, rest: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("content base url can not be a base"))?
            .pop_if_empty()
            .extend(["content", "users", owner])
            .extend(rest);
        Ok(url)
    }

    fn item_url(&self, item: &ItemRef, action: &str) -> anyhow::Result<Url> {
        self.user_url(&item.owner, &["items", &item.id, action])
    }

    fn common_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("f", "json".to_owned())];
        if let Some(token) = &self.token {
            fields.push(("token", token.to_owned()));
        }
        fields
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        fields: Vec<(&'static str, String)>,
    ) -> anyhow::Result<T> {
        let mut form = self.common_fields();
        form.extend(fields);
        let response = self
            .client
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .with_context(|| format!("POST {}", url.path()))?;
        read(response).await
    }
}

async fn read<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let response = response.error_for_status()?;
    let body: serde_json::Value = response.json().await?;
    parse_body(body)
}

#[async_trait]
impl ContentService for ContentServiceClient {
    async fn create_item(&self, command: &CreateItemCommand) -> anyhow::Result<CreatedItem> {
        let url = self.user_url(&command.owner, &["addItem"])?;
        let mut fields = metadata_fields(&command.metadata)?;
        fields.push(("multipart", command.multipart.to_string()));
        fields.push(("async", command.r#async.to_string()));
        if command.multipart {
            fields.push(("filename", command.metadata.title.to_owned()));
        }
        if let Some(item_url) = &command.url {
            fields.push(("url", item_url.to_owned()));
        }
        if let Some(text) = &command.text {
            fields.push(("text", text.to_owned()));
        }
        let response: AddItemResponse = self.post_form(url, fields).await?;
        match response {
            AddItemResponse {
                success: true,
                id: Some(id),
            } => Ok(CreatedItem { id }),
            _ => anyhow::bail!("service did not create item: {}", command.metadata.title),
        }
    }

    async fn add_part(
        &self,
        item: &ItemRef,
        part_number: u64,
        payload: Bytes,
    ) -> anyhow::Result<bool> {
        let url = self.item_url(item, "addPart")?;
        let len = payload.len() as u64;
        let file = Part::stream_with_length(payload, len)
            .file_name(format!("part{part_number}"))
            .mime_str("application/octet-stream")?;
        let mut form = Form::new().text("partNum", part_number.to_string());
        for (key, value) in self.common_fields() {
            form = form.text(key, value);
        }
        let response = self
            .client
            .post(url)
            .multipart(form.part("file", file))
            .send()
            .await
            .with_context(|| format!("add part {part_number} of item {}", item.id))?;
        let response: SuccessResponse = read(response).await?;
        Ok(response.success)
    }

    async fn commit_upload(
        &self,
        item: &ItemRef,
        metadata: &ItemMetadata,
    ) -> anyhow::Result<bool> {
        let url = self.item_url(item, "commit")?;
        let mut fields = metadata_fields(metadata)?;
        fields.push(("async", true.to_string()));
        let response: SuccessResponse = self.post_form(url, fields).await?;
        Ok(response.success)
    }

    async fn cancel_upload(&self, item: &ItemRef) -> anyhow::Result<bool> {
        let url = self.item_url(item, "cancelUpload")?;
        let response: SuccessResponse = self.post_form(url, vec![]).await?;
        Ok(response.success)
    }

    async fn item_status(&self, item: &ItemRef) -> anyhow::Result<ItemStatus> {
        let url = self.item_url(item, "status")?;
        let response = self
            .client
            .get(url)
            .query(&self.common_fields())
            .send()
            .await
            .with_context(|| format!("status of item {}", item.id))?;
        let response: StatusResponse = read(response).await?;
        Ok(response.into())
    }

    async fn set_item_access(&self, item: &ItemRef, access: Access) -> anyhow::Result<bool> {
        let url = self.item_url(item, "share")?;
        let response: ShareResponse = self.post_form(url, share_fields(access)).await?;
        if !response.not_shared_with.is_empty() {
            tracing::warn!(item_id = %item.id, groups = ?response.not_shared_with, "Item not shared with every target.");
        }
        Ok(response.not_shared_with.is_empty())
    }
}
