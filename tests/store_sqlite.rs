// Notification side-store tests against an in-memory SQLite database.

#![cfg(feature = "sqlite")]

use sift::store::{NotificationStore, SqliteNotificationStore};
use uuid::Uuid;

#[tokio::test]
async fn create_link_returns_the_new_row_id() {
    let store = SqliteNotificationStore::open_in_memory().unwrap();
    let id = store
        .create_link(
            Uuid::new_v4(),
            "https://notify.example.com/cb",
            Some("svc"),
            Some("hunter2"),
        )
        .await
        .unwrap();
    assert!(id >= 1);
}

#[tokio::test]
async fn link_urls_are_unique() {
    let store = SqliteNotificationStore::open_in_memory().unwrap();
    let url = "https://notify.example.com/cb";
    store
        .create_link(Uuid::new_v4(), url, None, None)
        .await
        .unwrap();
    let err = store.create_link(Uuid::new_v4(), url, None, None).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn delete_frees_the_url_for_reuse() {
    let store = SqliteNotificationStore::open_in_memory().unwrap();
    let url = "https://notify.example.com/cb";
    store
        .create_link(Uuid::new_v4(), url, None, None)
        .await
        .unwrap();
    store.delete_link(url).await.unwrap();
    // Both rows are gone, so the same URL can be linked again.
    store
        .create_link(Uuid::new_v4(), url, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_an_unknown_url_is_not_an_error() {
    let store = SqliteNotificationStore::open_in_memory().unwrap();
    store
        .delete_link("https://notify.example.com/never-linked")
        .await
        .unwrap();
}
