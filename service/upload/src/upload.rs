use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use domain_upload::{
    command::CreateItemCommand,
    exception::{UploadException, UploadResult},
    model::{
        entity::{ItemRef, RemoteItem},
        vo::{ItemContent, ItemMetadata, ItemStatus, TaskQueue, UploadRequest, UploadTask},
    },
    service::{ContentService, ReadinessService, UploadService},
};
use typed_builder::TypedBuilder;

use crate::chunker::{self, DEFAULT_PART_SIZE};
use crate::worker_pool::{TaskExecutor, WorkerPool, DEFAULT_CONCURRENCY};

/// # Upload service
///
/// Create item, upload parts, commit. Any failure after the item exists and
/// before the commit went through cancels the upload on the service.
#[derive(TypedBuilder)]
pub struct UploadServiceImpl {
    content_service: Arc<dyn ContentService>,
    readiness_service: Arc<dyn ReadinessService>,
    #[builder(default = DEFAULT_PART_SIZE)]
    part_size: usize,
    #[builder(default = DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

/// Uploads one part, a refused acknowledgment is an error.
struct PartExecutor {
    content_service: Arc<dyn ContentService>,
}

#[async_trait]
impl TaskExecutor<UploadTask> for PartExecutor {
    async fn execute(&self, task: UploadTask) -> UploadResult<()> {
        let part_number = task.part_number();
        let part_error = |source| UploadException::PartUpload {
            item_id: task.item.id.to_owned(),
            part_number,
            source,
        };
        tracing::trace!(item_id = %task.item.id, part_number, len = task.part.len(), "Uploading part.");
        let acknowledged = self
            .content_service
            .add_part(&task.item, part_number, task.part.payload.clone())
            .await
            .map_err(part_error)?;
        if !acknowledged {
            return Err(part_error(anyhow::anyhow!(
                "service did not acknowledge part {part_number}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UploadService for UploadServiceImpl {
    async fn upload(&self, request: UploadRequest) -> UploadResult<RemoteItem> {
        if matches!(request.content, ItemContent::Payload(_)) && self.part_size == 0 {
            return Err(UploadException::InvalidPartSize);
        }
        let needs_processing = request.content.needs_processing();

        let item = self.create(&request).await?;
        tracing::info!(item_id = %item.id, owner = %item.owner, "Item created.");

        if let ItemContent::Payload(payload) = &request.content {
            if let Err(e) = self.upload_and_commit(&item, payload, &request.metadata).await {
                self.compensate(&item).await;
                return Err(e);
            }
            tracing::info!(item_id = %item.id, "Upload committed.");
        }

        if needs_processing {
            self.readiness_service.wait_until_ready(&item).await?;
            tracing::info!(item_id = %item.id, "Item processed.");
        }

        if !request.access.is_default() {
            let acknowledged = self
                .content_service
                .set_item_access(&item, request.access)
                .await
                .map_err(|source| UploadException::SetAccess {
                    item_id: item.id.to_owned(),
                    source,
                })?;
            if !acknowledged {
                return Err(UploadException::SetAccess {
                    item_id: item.id.to_owned(),
                    source: anyhow::anyhow!("service did not acknowledge {:?} access", request.access),
                });
            }
        }

        Ok(RemoteItem {
            id: item.id,
            owner: item.owner,
            status: ItemStatus::Completed,
        })
    }
}

impl UploadServiceImpl {
    async fn create(&self, request: &UploadRequest) -> UploadResult<ItemRef> {
        let (multipart, url, text) = match &request.content {
            ItemContent::Payload(_) => (true, None, None),
            ItemContent::Url(url) => (false, Some(url.to_owned()), None),
            ItemContent::Text(text) => (false, None, Some(text.to_owned())),
        };
        let command = CreateItemCommand {
            owner: request.owner.to_owned(),
            metadata: request.metadata.to_owned(),
            multipart,
            r#async: request.content.needs_processing(),
            url,
            text,
        };
        let created = self
            .content_service
            .create_item(&command)
            .await
            .map_err(|source| UploadException::Create { source })?;
        Ok(ItemRef::new(created.id, &request.owner))
    }

    async fn upload_and_commit(
        &self,
        item: &ItemRef,
        payload: &Bytes,
        metadata: &ItemMetadata,
    ) -> UploadResult<()> {
        let tasks = chunker::chunk(item, payload, self.part_size)?;
        tracing::debug!(item_id = %item.id, parts = tasks.len(), size = payload.len(), "Payload chunked.");

        let executor: Arc<dyn TaskExecutor<UploadTask>> = Arc::new(PartExecutor {
            content_service: self.content_service.clone(),
        });
        let report = WorkerPool::builder()
            .concurrency(self.concurrency)
            .build()
            .run(TaskQueue::new(tasks), executor)
            .await?;
        tracing::debug!(
            item_id = %item.id,
            parts = report.total(),
            idle_workers = report.idle_workers(),
            "All parts uploaded."
        );

        let commit_error = |source| UploadException::Commit {
            item_id: item.id.to_owned(),
            source,
        };
        let acknowledged = self
            .content_service
            .commit_upload(item, &metadata.normalized())
            .await
            .map_err(commit_error)?;
        if !acknowledged {
            return Err(commit_error(anyhow::anyhow!("service did not acknowledge commit")));
        }
        Ok(())
    }

    /// Cancel the upload on the service. Failures here are logged and dropped
    /// so the caller always gets the error that caused the cancel.
    async fn compensate(&self, item: &ItemRef) {
        tracing::warn!(item_id = %item.id, "Upload failed, canceling.");
        let outcome = match self.content_service.cancel_upload(item).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(anyhow::anyhow!("service did not acknowledge cancel")),
            Err(e) => Err(e),
        };
        if let Err(source) = outcome {
            let ignored = UploadException::Cancel {
                item_id: item.id.to_owned(),
                source,
            };
            tracing::error!(item_id = %item.id, "{ignored}");
        }
    }
}

#[cfg(test)]
mod tests {
    use domain_upload::{
        command::CreatedItem,
        mock::{MockContentService, MockReadinessService},
        model::vo::{Access, Extent},
    };

    use super::*;

    fn request(content: ItemContent) -> UploadRequest {
        UploadRequest {
            owner: "alice".to_owned(),
            metadata: ItemMetadata {
                title: "parcels".to_owned(),
                item_type: "File Geodatabase".to_owned(),
                extent: Some(Extent::Corners([[1.0, 2.0], [3.0, 4.0]])),
                ..Default::default()
            },
            content,
            access: Access::Private,
        }
    }

    fn ready() -> Arc<MockReadinessService> {
        let mut readiness = MockReadinessService::new();
        readiness.expect_wait_until_ready().times(1).returning(|_| Ok(()));
        Arc::new(readiness)
    }

    fn created(content_service: &mut MockContentService) {
        content_service
            .expect_create_item()
            .times(1)
            .returning(|_| Ok(CreatedItem { id: "abc".to_owned() }));
    }

    #[tokio::test]
    async fn commit_sends_normalized_extent() {
        let mut content_service = MockContentService::new();
        created(&mut content_service);
        content_service.expect_add_part().times(2).returning(|_, _, _| Ok(true));
        content_service
            .expect_commit_upload()
            .withf(|item, metadata| {
                item.id == "abc" && metadata.extent == Some(Extent::Text("1,2,3,4".to_owned()))
            })
            .times(1)
            .returning(|_, _| Ok(true));
        content_service.expect_cancel_upload().never();

        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(ready())
            .part_size(4)
            .build();
        let item = service
            .upload(request(ItemContent::Payload(Bytes::from_static(b"12345678"))))
            .await
            .unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.owner, "alice");
        assert_eq!(item.status, ItemStatus::Completed);
    }

    #[tokio::test]
    async fn refused_commit_cancels() {
        let mut content_service = MockContentService::new();
        created(&mut content_service);
        content_service.expect_add_part().returning(|_, _, _| Ok(true));
        content_service.expect_commit_upload().times(1).returning(|_, _| Ok(false));
        content_service.expect_cancel_upload().times(1).returning(|_| Ok(true));
        let mut readiness = MockReadinessService::new();
        readiness.expect_wait_until_ready().never();

        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(Arc::new(readiness))
            .build();
        let err = service
            .upload(request(ItemContent::Payload(Bytes::from_static(b"data"))))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadException::Commit { .. }));
    }

    #[tokio::test]
    async fn zero_part_size_is_rejected_before_create() {
        let mut content_service = MockContentService::new();
        content_service.expect_create_item().never();
        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(Arc::new(MockReadinessService::new()))
            .part_size(0)
            .build();
        let err = service
            .upload(request(ItemContent::Payload(Bytes::from_static(b"data"))))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadException::InvalidPartSize));
    }

    #[tokio::test]
    async fn url_item_waits_without_parts() {
        let mut content_service = MockContentService::new();
        content_service
            .expect_create_item()
            .withf(|command| {
                !command.multipart
                    && command.r#async
                    && command.url.as_deref() == Some("https://example.com/data.csv")
            })
            .times(1)
            .returning(|_| Ok(CreatedItem { id: "u1".to_owned() }));
        content_service.expect_add_part().never();
        content_service.expect_commit_upload().never();

        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(ready())
            .build();
        let item = service
            .upload(request(ItemContent::Url("https://example.com/data.csv".to_owned())))
            .await
            .unwrap();
        assert_eq!(item.id, "u1");
    }

    #[tokio::test]
    async fn text_item_is_not_polled_and_gets_access() {
        let mut content_service = MockContentService::new();
        content_service
            .expect_create_item()
            .withf(|command| !command.r#async && command.text.as_deref() == Some("{}"))
            .times(1)
            .returning(|_| Ok(CreatedItem { id: "t1".to_owned() }));
        content_service
            .expect_set_item_access()
            .withf(|item, access| item.id == "t1" && *access == Access::Public)
            .times(1)
            .returning(|_, _| Ok(true));
        let mut readiness = MockReadinessService::new();
        readiness.expect_wait_until_ready().never();

        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(Arc::new(readiness))
            .build();
        let mut request = request(ItemContent::Text("{}".to_owned()));
        request.access = Access::Public;
        service.upload(request).await.unwrap();
    }

    #[tokio::test]
    async fn readiness_failure_is_not_compensated() {
        let mut content_service = MockContentService::new();
        created(&mut content_service);
        content_service.expect_add_part().returning(|_, _, _| Ok(true));
        content_service.expect_commit_upload().times(1).returning(|_, _| Ok(true));
        content_service.expect_cancel_upload().never();
        let mut readiness = MockReadinessService::new();
        readiness.expect_wait_until_ready().times(1).returning(|item| {
            Err(UploadException::Readiness {
                item_id: item.id.to_owned(),
                message: "invalid shapefile".to_owned(),
            })
        });

        let service = UploadServiceImpl::builder()
            .content_service(Arc::new(content_service))
            .readiness_service(Arc::new(readiness))
            .build();
        let err = service
            .upload(request(ItemContent::Payload(Bytes::from_static(b"data"))))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadException::Readiness { .. }));
    }
}
