// Work-queue seam — deferred execution for the write-heavy operations.
//
// When a queue handle is configured, moderate / flag_content / add_user
// hand a serialized job to the queue instead of calling the service. A
// worker elsewhere deserializes the payload and re-invokes the same
// facade operation. Queue retry/priority values are resolved from the
// client config exactly once, when the job is built — the facade never
// looks inside the queue beyond this contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::JobPriority;
use crate::error::Result;

/// Which facade operation a job defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobKind {
    Moderate,
    FlagContent,
    AddUser,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Moderate => "moderate",
            JobKind::FlagContent => "flagContent",
            JobKind::AddUser => "addUser",
        }
    }
}

/// A serialized deferred operation, consumed exactly once by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueJob {
    pub name: JobKind,
    /// The operation's arguments, shaped per operation:
    /// `{"content": parts, "opts": options}` for moderate,
    /// `{"contentId", "reporterId", "opts"}` for flagContent,
    /// `{"userId", "opts"}` for addUser.
    pub payload: serde_json::Value,
    pub attempts: u32,
    pub priority: JobPriority,
}

/// External queue collaborator. `enqueue` resolves once the queue has
/// durably accepted the job, or propagates whatever error it raised.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: QueueJob) -> Result<()>;
}
