// SqliteNotificationStore — rusqlite backend for the NotificationStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work
// inside a transaction, and return. The lock is never held across .await
// points — Rust enforces this because MutexGuard is !Send.

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::schema;
use super::traits::NotificationStore;
use crate::error::Result;

pub struct SqliteNotificationStore {
    conn: Mutex<Connection>,
}

impl SqliteNotificationStore {
    /// Open (or create) the store at the given path and ensure the
    /// schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl NotificationStore for SqliteNotificationStore {
    async fn create_link(
        &self,
        application_id: Uuid,
        url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<i64> {
        let mut conn = self.conn.lock().await;
        // Transaction rolls back on any early return, including the `?`s.
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO notification_servers
                 (url, http_authentication_username, http_authentication_password)
             VALUES (?1, ?2, ?3)",
            params![url, username, password],
        )?;
        let server_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO application_notification_servers
                 (applications_id, notification_servers_id)
             VALUES (?1, ?2)",
            params![application_id.to_string(), server_id],
        )?;
        tx.commit()?;
        Ok(server_id)
    }

    async fn delete_link(&self, url: &str) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM application_notification_servers
             WHERE notification_servers_id IN
                 (SELECT id FROM notification_servers WHERE url = ?1)",
            params![url],
        )?;
        tx.execute(
            "DELETE FROM notification_servers WHERE url = ?1",
            params![url],
        )?;
        tx.commit()?;
        Ok(())
    }
}
