use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use domain_upload::{
    command::CreatedItem,
    exception::{UploadException, UploadResult},
    mock::{MockContentService, MockReadinessService},
    model::{
        entity::ItemRef,
        vo::{Access, ItemContent, ItemMetadata, TaskQueue, UploadRequest, UploadTask},
    },
    service::UploadService,
};
use service_upload::{chunk, TaskExecutor, UploadServiceImpl, WorkerPool, DEFAULT_PART_SIZE};
use tokio::sync::Barrier;

const EIGHTEEN_MB: usize = 18_000_000;

fn payload_request(len: usize) -> UploadRequest {
    UploadRequest {
        owner: "alice".to_owned(),
        metadata: ItemMetadata {
            title: "imagery".to_owned(),
            item_type: "Image".to_owned(),
            ..Default::default()
        },
        content: ItemContent::Payload(Bytes::from(vec![1u8; len])),
        access: Access::Private,
    }
}

fn content_service_created() -> MockContentService {
    let mut content_service = MockContentService::new();
    content_service
        .expect_create_item()
        .withf(|command| command.multipart && command.r#async && command.owner == "alice")
        .times(1)
        .returning(|_| Ok(CreatedItem { id: "item-1".to_owned() }));
    content_service
}

fn service(content_service: MockContentService, readiness: MockReadinessService) -> UploadServiceImpl {
    UploadServiceImpl::builder()
        .content_service(Arc::new(content_service))
        .readiness_service(Arc::new(readiness))
        .build()
}

fn not_polled() -> MockReadinessService {
    let mut readiness = MockReadinessService::new();
    readiness.expect_wait_until_ready().never();
    readiness
}

#[tokio::test]
async fn test_eighteen_megabytes_commit_once() {
    let uploaded = Arc::new(Mutex::new(vec![]));
    let mut content_service = content_service_created();
    let recorder = uploaded.clone();
    content_service.expect_add_part().times(3).returning(move |item, part_number, payload| {
        assert_eq!(item.id, "item-1");
        recorder.lock().unwrap().push((part_number, payload.len()));
        Ok(true)
    });
    content_service.expect_commit_upload().times(1).returning(|_, _| Ok(true));
    content_service.expect_cancel_upload().never();
    let mut readiness = MockReadinessService::new();
    readiness.expect_wait_until_ready().times(1).returning(|_| Ok(()));

    let item = service(content_service, readiness)
        .upload(payload_request(EIGHTEEN_MB))
        .await
        .unwrap();
    assert_eq!(item.id, "item-1");

    let mut uploaded = uploaded.lock().unwrap().clone();
    uploaded.sort_unstable();
    assert_eq!(
        uploaded,
        vec![(1, DEFAULT_PART_SIZE), (2, DEFAULT_PART_SIZE), (3, DEFAULT_PART_SIZE)]
    );
}

struct BarrierExecutor {
    barrier: Barrier,
}

#[async_trait]
impl TaskExecutor<UploadTask> for BarrierExecutor {
    async fn execute(&self, _task: UploadTask) -> UploadResult<()> {
        self.barrier.wait().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_three_parts_leave_two_workers_idle() {
    let payload = Bytes::from(vec![0u8; EIGHTEEN_MB]);
    let tasks = chunk(&ItemRef::new("item-1", "alice"), &payload, DEFAULT_PART_SIZE).unwrap();
    assert_eq!(tasks.len(), 3);

    // Every part blocks until all three are in flight, so no worker can take two.
    let executor: Arc<dyn TaskExecutor<UploadTask>> = Arc::new(BarrierExecutor {
        barrier: Barrier::new(3),
    });
    let report = WorkerPool::builder()
        .concurrency(5)
        .build()
        .run(TaskQueue::new(tasks), executor)
        .await
        .unwrap();
    assert_eq!(report.total(), 3);
    assert_eq!(report.idle_workers(), 2);
}

#[tokio::test]
async fn test_failed_part_cancels_once() {
    let mut content_service = content_service_created();
    content_service.expect_add_part().times(1..=3).returning(|_, part_number, _| {
        if part_number == 2 {
            Err(anyhow::anyhow!("connection reset"))
        } else {
            Ok(true)
        }
    });
    content_service.expect_commit_upload().never();
    content_service
        .expect_cancel_upload()
        .withf(|item| item.id == "item-1" && item.owner == "alice")
        .times(1)
        .returning(|_| Ok(true));

    let err = service(content_service, not_polled())
        .upload(payload_request(EIGHTEEN_MB))
        .await
        .unwrap_err();
    match err {
        UploadException::PartUpload {
            item_id,
            part_number,
            source,
        } => {
            assert_eq!(item_id, "item-1");
            assert_eq!(part_number, 2);
            assert_eq!(source.to_string(), "connection reset");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_refused_part_cancels_once() {
    let mut content_service = content_service_created();
    content_service
        .expect_add_part()
        .times(1..=3)
        .returning(|_, part_number, _| Ok(part_number != 2));
    content_service.expect_commit_upload().never();
    content_service.expect_cancel_upload().times(1).returning(|_| Ok(true));

    let err = service(content_service, not_polled())
        .upload(payload_request(EIGHTEEN_MB))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadException::PartUpload { part_number: 2, .. }));
}

#[tokio::test]
async fn test_cancel_failure_keeps_part_error() {
    let mut content_service = content_service_created();
    content_service
        .expect_add_part()
        .returning(|_, _, _| Err(anyhow::anyhow!("payload too large")));
    content_service.expect_commit_upload().never();
    content_service
        .expect_cancel_upload()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("cancel endpoint unavailable")));

    let err = service(content_service, not_polled())
        .upload(payload_request(10))
        .await
        .unwrap_err();
    match err {
        UploadException::PartUpload { source, .. } => {
            assert_eq!(source.to_string(), "payload too large")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_failure_is_not_compensated() {
    let mut content_service = MockContentService::new();
    content_service
        .expect_create_item()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("quota exceeded")));
    content_service.expect_add_part().never();
    content_service.expect_cancel_upload().never();

    let err = service(content_service, not_polled())
        .upload(payload_request(10))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadException::Create { .. }));
}

#[tokio::test]
async fn test_empty_payload_commits_without_parts() {
    let mut content_service = content_service_created();
    content_service.expect_add_part().never();
    content_service.expect_commit_upload().times(1).returning(|_, _| Ok(true));
    content_service.expect_cancel_upload().never();
    let mut readiness = MockReadinessService::new();
    readiness.expect_wait_until_ready().times(1).returning(|_| Ok(()));

    service(content_service, readiness)
        .upload(payload_request(0))
        .await
        .unwrap();
}
