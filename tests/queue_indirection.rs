// Queue indirection and disabled-mode tests.
//
// These run with a transport that counts every attempted exchange, so a
// "no network I/O" claim is checked, not assumed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

use sift::client::applications::ApplicationOptions;
use sift::client::filter::FilterOptions;
use sift::client::moderation::{ContentPart, ContentType, ModerateOptions};
use sift::client::users::UserOptions;
use sift::error::ClientError;
use sift::queue::{JobKind, JobQueue, QueueJob};
use sift::transport::{ApiRequest, ApiResponse, Transport};
use sift::{ClientConfig, JobPriority, ModerationClient, QueueOptions};

/// Counts exchanges instead of performing them. Any hit from a test
/// that promises zero I/O shows up as a nonzero count.
#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn execute(&self, _request: ApiRequest) -> sift::Result<ApiResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ApiResponse {
            status: 200,
            body: String::new(),
        })
    }
}

/// Records every job it is handed.
#[derive(Default)]
struct RecordingQueue {
    jobs: Mutex<Vec<QueueJob>>,
    fail: bool,
}

#[async_trait]
impl JobQueue for RecordingQueue {
    async fn enqueue(&self, job: QueueJob) -> sift::Result<()> {
        if self.fail {
            return Err(ClientError::Queue("queue is full".into()));
        }
        self.jobs.lock().await.push(job);
        Ok(())
    }
}

fn queued_client(
    config: ClientConfig,
) -> (ModerationClient, Arc<CountingTransport>, Arc<RecordingQueue>) {
    let transport = Arc::new(CountingTransport::default());
    let queue = Arc::new(RecordingQueue::default());
    let client = ModerationClient::builder(config)
        .transport(transport.clone())
        .queue(queue.clone())
        .build()
        .unwrap();
    (client, transport, queue)
}

#[tokio::test]
async fn moderate_enqueues_instead_of_calling_the_service() {
    let (client, transport, queue) =
        queued_client(ClientConfig::new("http://localhost:8001"));

    let content_id = Uuid::new_v4();
    let parts = vec![ContentPart {
        name: "body".into(),
        content: "hello".into(),
        part_type: ContentType::Text,
    }];
    client
        .moderate(&parts, &ModerateOptions::new(content_id))
        .await
        .unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    let jobs = queue.jobs.lock().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].name, JobKind::Moderate);
    assert_eq!(jobs[0].attempts, 5);
    assert_eq!(jobs[0].priority, JobPriority::Normal);
    assert_eq!(
        jobs[0].payload,
        json!({
            "content": [{"name": "body", "content": "hello", "type": "text"}],
            "opts": {"contentId": content_id},
        })
    );
}

#[tokio::test]
async fn queued_jobs_carry_the_configured_attempts_and_priority() {
    let config = ClientConfig::new("http://localhost:8001").queue_options(QueueOptions {
        attempts: 2,
        priority: JobPriority::High,
    });
    let (client, _, queue) = queued_client(config);

    client
        .flag_content(Uuid::new_v4(), Uuid::new_v4(), &Default::default())
        .await
        .unwrap();

    let jobs = queue.jobs.lock().await;
    assert_eq!(jobs[0].attempts, 2);
    assert_eq!(jobs[0].priority, JobPriority::High);
}

#[tokio::test]
async fn flag_content_enqueues_its_positional_arguments() {
    let (client, transport, queue) =
        queued_client(ClientConfig::new("http://localhost:8001"));

    let content_id = Uuid::new_v4();
    let reporter_id = Uuid::new_v4();
    let options = sift::client::moderation::FlagOptions {
        reason: Some("spam".into()),
        comment: None,
    };
    client
        .flag_content(content_id, reporter_id, &options)
        .await
        .unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    let jobs = queue.jobs.lock().await;
    assert_eq!(jobs[0].name, JobKind::FlagContent);
    assert_eq!(
        jobs[0].payload,
        json!({
            "contentId": content_id,
            "reporterId": reporter_id,
            "opts": {"reason": "spam"},
        })
    );
}

#[tokio::test]
async fn add_user_enqueues_its_options() {
    let (client, transport, queue) =
        queued_client(ClientConfig::new("http://localhost:8001"));

    let user_id = Uuid::new_v4();
    let options = UserOptions {
        email: Some("user@example.com".into()),
        ..Default::default()
    };
    client.add_user(user_id, &options).await.unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    let jobs = queue.jobs.lock().await;
    assert_eq!(jobs[0].name, JobKind::AddUser);
    assert_eq!(
        jobs[0].payload,
        json!({"userId": user_id, "opts": {"email": "user@example.com"}})
    );
}

#[tokio::test]
async fn enqueue_failures_surface_to_the_caller() {
    let transport = Arc::new(CountingTransport::default());
    let queue = Arc::new(RecordingQueue {
        fail: true,
        ..Default::default()
    });
    let client = ModerationClient::builder(ClientConfig::new("http://localhost:8001"))
        .transport(transport.clone())
        .queue(queue)
        .build()
        .unwrap();

    let err = client
        .moderate(&[], &ModerateOptions::new(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Queue(_)));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn filter_still_goes_over_http_when_a_queue_is_configured() {
    let (client, transport, queue) =
        queued_client(ClientConfig::new("http://localhost:8001"));

    // Filter is synchronous by nature — only the write-heavy operations
    // defer to the queue. The empty-body 200 fails decoding, which is
    // fine here; the exchange itself is what's being counted.
    let _ = client.filter("hello", &FilterOptions::default()).await;

    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert!(queue.jobs.lock().await.is_empty());
}

#[tokio::test]
async fn disabled_client_performs_no_io_at_all() {
    let config = ClientConfig::new("http://localhost:8001").enabled(false);
    let (client, transport, queue) = queued_client(config);

    let result = client
        .filter("dirty", &FilterOptions::default())
        .await
        .unwrap();
    assert!(!result.filtered);
    assert_eq!(result.replacement, "dirty");

    client
        .moderate(&[], &ModerateOptions::new(Uuid::new_v4()))
        .await
        .unwrap();
    client
        .flag_content(Uuid::new_v4(), Uuid::new_v4(), &Default::default())
        .await
        .unwrap();
    client
        .add_user(Uuid::new_v4(), &UserOptions::default())
        .await
        .unwrap();
    let created = client
        .create_application("forum", &ApplicationOptions::default())
        .await
        .unwrap();
    assert_eq!(created, None);
    client
        .update_application(Uuid::new_v4(), "forum", &Default::default())
        .await
        .unwrap();
    client
        .delete_application(Uuid::new_v4(), &Default::default())
        .await
        .unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    assert!(queue.jobs.lock().await.is_empty());
}
