// Client configuration — resolved once, before construction, by the caller.
//
// No environment variables are read here. Whatever process embeds this
// library decides where host names and tokens come from; the client only
// ever sees the finished, immutable value.

use serde::{Deserialize, Serialize};

/// Priority assigned to deferred moderation jobs.
///
/// Mirrors the priority levels of the external work queue. Serialized
/// lowercase so a worker on the other side can read it back directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPriority {
    Low,
    Normal,
    Medium,
    High,
    Critical,
}

/// Options applied to every job handed to the work queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueOptions {
    /// How many times the worker may retry a failed job.
    pub attempts: u32,
    pub priority: JobPriority,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            attempts: 5,
            priority: JobPriority::Normal,
        }
    }
}

/// Immutable configuration for a [`ModerationClient`](crate::ModerationClient).
///
/// Owned exclusively by one client instance; operations never consult any
/// ambient state beyond this value.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the moderation service, scheme and port included.
    pub host: String,
    /// Token sent as the `Authentication` header on every request.
    pub auth_token: Option<String>,
    /// Base URL the moderation service calls back with decisions.
    pub notification_host: Option<String>,
    /// HTTP auth credentials stored alongside each notification link.
    pub notification_username: Option<String>,
    pub notification_password: Option<String>,
    /// When false, every operation becomes a local no-op: `filter` passes
    /// content through unchanged, everything else succeeds without I/O.
    pub enabled: bool,
    pub queue_options: QueueOptions,
}

impl ClientConfig {
    /// Create a config pointing at the given service host with all
    /// defaults: enabled, no auth token, no notification settings,
    /// 5 attempts at normal priority for queued jobs.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            auth_token: None,
            notification_host: None,
            notification_username: None,
            notification_password: None,
            enabled: true,
            queue_options: QueueOptions::default(),
        }
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn notification_host(mut self, host: impl Into<String>) -> Self {
        self.notification_host = Some(host.into());
        self
    }

    pub fn notification_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.notification_username = Some(username.into());
        self.notification_password = Some(password.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn queue_options(mut self, options: QueueOptions) -> Self {
        self.queue_options = options;
        self
    }
}
