// Application (tenant) lifecycle.
//
// Creating an application is a two-step sequence: create the remote
// record, then persist a notification link in the local side-store so
// the service knows where to report moderation decisions. The sequence
// is not transactional — a link failure leaves the remote application
// orphaned, and the error surfaced is the link step's. Callers that
// need atomicity must clean up themselves.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::ModerationClient;
use crate::error::{ClientError, Result};

/// Options for the application lifecycle operations. The six
/// moderation-configuration booleans are each omitted from the wire when
/// unset, letting the service apply its own defaults; anything else a
/// caller might pile into an options value never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOptions {
    /// Caller-supplied application id. Absent means the service
    /// generates one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Path appended to the configured notification host to form the
    /// callback URI. Required for create and delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_deletable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_user_actions_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action_is_queue_for_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_content: Option<bool>,
}

/// The moderationConfiguration wire object: exactly the six recognized
/// booleans, nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModerationConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    content_deletable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_user_actions_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_action_is_queue_for_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    persistent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_content: Option<bool>,
}

impl ApplicationOptions {
    pub(crate) fn moderation_configuration(&self) -> ModerationConfiguration {
        ModerationConfiguration {
            content_deletable: self.content_deletable,
            content_editable: self.content_editable,
            content_user_actions_enabled: self.content_user_actions_enabled,
            default_action_is_queue_for_approval: self.default_action_is_queue_for_approval,
            persistent: self.persistent,
            store_content: self.store_content,
        }
    }

    fn require_notification_path(&self) -> Result<&str> {
        self.notification_path
            .as_deref()
            .ok_or_else(|| ClientError::Validation("notification_path is required".into()))
    }
}

#[derive(Deserialize)]
struct ApplicationResponseBody {
    application: ApplicationRecord,
}

#[derive(Deserialize)]
struct ApplicationRecord {
    id: Uuid,
}

impl ModerationClient {
    /// Create an application and link it to a notification endpoint.
    ///
    /// Returns the application id echoed by the service, or `None` when
    /// the client is disabled. Supplying `options.id` creates the
    /// application under that exact id.
    pub async fn create_application(
        &self,
        name: &str,
        options: &ApplicationOptions,
    ) -> Result<Option<Uuid>> {
        if self.is_disabled() {
            return Ok(None);
        }

        // All validation happens before any I/O.
        let path = options.require_notification_path()?;
        let (store, url) = self.notification_target(path)?;

        let request_path = match options.id {
            Some(id) => format!("/system/application/{id}"),
            None => "/system/application".to_string(),
        };
        let body = json!({
            "application": {
                "name": name,
                "moderationConfiguration": options.moderation_configuration(),
            }
        });

        let request = self.request(Method::POST, &request_path, Some(body));
        let response = self.send(request).await?;
        let created: ApplicationResponseBody = serde_json::from_str(&response.body)?;
        let application_id = created.application.id;

        // Not transactional: a failure here leaves the remote
        // application in place and surfaces the store's error.
        store
            .create_link(
                application_id,
                &url,
                self.config.notification_username.as_deref(),
                self.config.notification_password.as_deref(),
            )
            .await?;

        Ok(Some(application_id))
    }

    /// Update an application's name and moderation configuration.
    pub async fn update_application(
        &self,
        id: Uuid,
        name: &str,
        options: &ApplicationOptions,
    ) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }

        let body = json!({
            "application": {
                "name": name,
                "moderationConfiguration": options.moderation_configuration(),
            }
        });
        let path = format!("/system/application/{id}");
        let request = self.request(Method::PUT, &path, Some(body));
        self.send(request).await?;
        Ok(())
    }

    /// Delete an application and its notification link.
    ///
    /// Fails with a validation error, before any I/O, when
    /// `options.notification_path` is absent.
    pub async fn delete_application(&self, id: Uuid, options: &ApplicationOptions) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }

        let path = options.require_notification_path()?;
        let (store, url) = self.notification_target(path)?;

        let request_path = format!("/system/application/{id}");
        let request = self.request(Method::DELETE, &request_path, None);
        self.send(request).await?;

        store.delete_link(&url).await
    }
}
