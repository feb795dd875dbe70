// User registration.
//
// The service keeps a per-user record so moderators see display names,
// email, and login history next to flagged content. The outgoing user
// object carries only the fields the caller actually supplied, plus a
// createInstant stamped here.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use uuid::Uuid;

use super::{now_millis, ModerationClient};
use crate::error::Result;
use crate::queue::JobKind;

/// A login instant supplied either as epoch millis or as a date value.
/// Always serialized as epoch millis, so both forms produce identical
/// wire payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginInstant {
    Millis(i64),
    Date(DateTime<Utc>),
}

impl LoginInstant {
    pub fn as_millis(&self) -> i64 {
        match self {
            LoginInstant::Millis(millis) => *millis,
            LoginInstant::Date(date) => date.timestamp_millis(),
        }
    }
}

impl From<i64> for LoginInstant {
    fn from(millis: i64) -> Self {
        LoginInstant::Millis(millis)
    }
}

impl From<DateTime<Utc>> for LoginInstant {
    fn from(date: DateTime<Utc>) -> Self {
        LoginInstant::Date(date)
    }
}

impl Serialize for LoginInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for LoginInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(LoginInstant::Millis(i64::deserialize(deserializer)?))
    }
}

/// Options for [`ModerationClient::add_user`]. Every field is optional
/// and omitted from the wire when unset — the service treats a missing
/// key differently from an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_names: Option<Vec<String>>,
    /// Birth date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_instant: Option<LoginInstant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// True when updating an existing record (issues a PUT).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update: bool,
}

impl ModerationClient {
    /// Register (or update) a user record with the moderation service.
    pub async fn add_user(&self, user_id: Uuid, options: &UserOptions) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }

        if let Some(queue) = self.queue.clone() {
            let payload = json!({ "userId": user_id, "opts": options });
            return self.enqueue(&queue, JobKind::AddUser, payload).await;
        }

        // Project the supplied fields onto the wire shape; `update`
        // steers the HTTP method and never reaches the service.
        let mut user = match serde_json::to_value(options)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        user.remove("update");
        user.insert("createInstant".into(), json!(now_millis()));

        let method = if options.update {
            Method::PUT
        } else {
            Method::POST
        };
        let path = format!("/content/user/{user_id}");
        let request = self.request(method, &path, Some(json!({ "user": user })));
        self.send(request).await?;
        Ok(())
    }
}
