// ModerationClient — the facade over the moderation service.
//
// Each public operation issues at most one HTTP request, or one enqueue
// when a work queue is configured, or nothing at all when the client is
// disabled. Option structs live next to the operations that consume
// them; this module holds the shared plumbing: the builder, the
// disabled gate, URL/request construction, status normalization, and
// the queue hand-off.

pub mod applications;
pub mod filter;
pub mod moderation;
pub mod users;

use std::sync::Arc;

use chrono::Utc;
use reqwest::Method;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::queue::{JobKind, JobQueue, QueueJob};
use crate::store::NotificationStore;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Client for the moderation service. Cheap to share behind an `Arc`;
/// concurrent calls are independent — the only shared state is the
/// immutable config and the transport's connection pool.
pub struct ModerationClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    queue: Option<Arc<dyn JobQueue>>,
    store: Option<Arc<dyn NotificationStore>>,
}

/// Builder for [`ModerationClient`]. The transport, queue, and
/// notification store are constructor-supplied capabilities: production
/// code takes the defaults, tests inject observers.
pub struct ModerationClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    queue: Option<Arc<dyn JobQueue>>,
    store: Option<Arc<dyn NotificationStore>>,
}

impl ModerationClientBuilder {
    /// Replace the reqwest-backed transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Configure a work queue. Its presence switches `moderate`,
    /// `flag_content`, and `add_user` from synchronous HTTP to enqueue
    /// mode.
    pub fn queue(mut self, queue: Arc<dyn JobQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Configure the notification side-store used by the application
    /// lifecycle operations.
    pub fn notification_store(mut self, store: Arc<dyn NotificationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Open the default SQLite notification store at the given path.
    #[cfg(feature = "sqlite")]
    pub fn sqlite_store(mut self, path: &str) -> Result<Self> {
        let store = crate::store::SqliteNotificationStore::open(path)?;
        self.store = Some(Arc::new(store));
        Ok(self)
    }

    pub fn build(self) -> Result<ModerationClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };
        Ok(ModerationClient {
            config: self.config,
            transport,
            queue: self.queue,
            store: self.store,
        })
    }
}

impl ModerationClient {
    /// Client with the production transport, no queue, no store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ModerationClientBuilder {
        ModerationClientBuilder {
            config,
            transport: None,
            queue: None,
            store: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The disabled gate: true when operations should short-circuit
    /// without any network or queue I/O.
    pub(crate) fn is_disabled(&self) -> bool {
        !self.config.enabled
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiRequest {
        ApiRequest {
            method,
            url: format!("{}{}", self.config.host, path),
            auth_token: self.config.auth_token.clone(),
            body,
        }
    }

    /// Issue a request and normalize the status: 200 passes the raw
    /// response through, anything else becomes a `ClientError` per the
    /// taxonomy (401 → Authentication, otherwise Remote). Transport
    /// failures propagate untouched.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.execute(request).await?;
        if response.status != 200 {
            return Err(ClientError::from_response(response.status, &response.body));
        }
        Ok(response)
    }

    /// Hand a deferred operation to the configured queue, carrying the
    /// retry/priority values from the client config.
    pub(crate) async fn enqueue(
        &self,
        queue: &Arc<dyn JobQueue>,
        name: JobKind,
        payload: serde_json::Value,
    ) -> Result<()> {
        debug!(job = name.as_str(), "deferring operation to work queue");
        queue
            .enqueue(QueueJob {
                name,
                payload,
                attempts: self.config.queue_options.attempts,
                priority: self.config.queue_options.priority,
            })
            .await
    }

    /// Resolve the full callback URI for a notification path and make
    /// sure a store is configured. Shared by the application lifecycle
    /// operations; fails before any I/O.
    pub(crate) fn notification_target(
        &self,
        path: &str,
    ) -> Result<(Arc<dyn NotificationStore>, String)> {
        let store = self
            .store
            .as_ref()
            .cloned()
            .ok_or_else(|| ClientError::Validation("no notification store configured".into()))?;
        let host = self.config.notification_host.as_deref().ok_or_else(|| {
            ClientError::Validation("notification_host is not configured".into())
        })?;
        Ok((store, format!("{}{}", host.trim_end_matches('/'), path)))
    }
}

/// Current time as epoch millis — the service's `createInstant` unit.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
