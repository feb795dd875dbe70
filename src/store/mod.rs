// Notification side-store — local persistence for callback routing.
//
// The moderation service reports decisions back over HTTP. Which URL and
// credentials it should use for a given application lives outside the
// service, in a small relational store owned by the embedding system.
// The facade only needs two opaque capabilities: persist a link when an
// application is created, remove it when the application is deleted.

pub mod traits;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use traits::NotificationStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteNotificationStore;
