// Side-store trait — backend-agnostic async interface for the two link
// operations. The default backend is SQLite via rusqlite; anything that
// can insert and delete a keyed row fits behind this.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification link for a newly-created application and
    /// return the link's row id. `url` is the fully-resolved callback
    /// URI; credentials are stored alongside it for the service to use
    /// when calling back.
    async fn create_link(
        &self,
        application_id: Uuid,
        url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<i64>;

    /// Remove the link with the given callback URI, along with its
    /// application associations. Removing a URI that was never stored
    /// is not an error.
    async fn delete_link(&self, url: &str) -> Result<()>;
}
