// Side-store schema — table creation for the SQLite backend.

use rusqlite::Connection;

use crate::error::Result;

/// Create the notification tables if they don't exist yet.
///
/// Idempotent — safe to call on every open.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- One row per notification callback endpoint
        CREATE TABLE IF NOT EXISTS notification_servers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL UNIQUE,
            http_authentication_username TEXT,
            http_authentication_password TEXT
        );

        -- Which applications report through which endpoint
        CREATE TABLE IF NOT EXISTS application_notification_servers (
            applications_id TEXT NOT NULL,     -- application UUID
            notification_servers_id INTEGER NOT NULL
                REFERENCES notification_servers(id)
        );
        ",
    )?;
    Ok(())
}
