// Moderation queueing and content flagging.
//
// `moderate` submits user-generated content for review; `flag_content`
// reports already-submitted content. Both defer to the work queue when
// one is configured.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{now_millis, ModerationClient};
use crate::error::Result;
use crate::queue::JobKind;

/// One named piece of a content item (a post body, a username field, an
/// attached image URL, ...). Part names are unique within a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPart {
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub part_type: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Attribute,
    Hyperlink,
    Image,
    Video,
    Audio,
}

/// Options for [`ModerationClient::moderate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateOptions {
    /// Identifies the content item; also the path segment of the request.
    pub content_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_display_name: Option<String>,
    /// Queue the content for human approval.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_approval: bool,
    /// Raise an alert for the moderators. Takes priority over
    /// `requires_approval` when both are set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generates_alert: bool,
    /// True when re-submitting edited content (issues a PUT).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update: bool,
}

impl ModerateOptions {
    pub fn new(content_id: Uuid) -> Self {
        Self {
            content_id,
            application_id: None,
            sender_id: None,
            sender_display_name: None,
            requires_approval: false,
            generates_alert: false,
            update: false,
        }
    }

    /// The single moderation-queue tag, by priority: alert beats
    /// approval, neither means untagged (content is only held if a
    /// filter rule independently flags it).
    fn moderation_tag(&self) -> Option<&'static str> {
        if self.generates_alert {
            Some("generatesAlert")
        } else if self.requires_approval {
            Some("requiresApproval")
        } else {
            None
        }
    }
}

/// Options for [`ModerationClient::flag_content`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ModerationClient {
    /// Submit content parts to the moderation queue.
    ///
    /// With a queue configured the call enqueues a `moderate` job and
    /// returns once the queue acknowledges — no HTTP request is made
    /// here; the worker re-invokes this operation without a queue.
    pub async fn moderate(&self, parts: &[ContentPart], options: &ModerateOptions) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }

        if let Some(queue) = self.queue.clone() {
            let payload = json!({ "content": parts, "opts": options });
            return self.enqueue(&queue, JobKind::Moderate, payload).await;
        }

        let method = if options.update {
            Method::PUT
        } else {
            Method::POST
        };
        let mut content = json!({
            "createInstant": now_millis(),
            "parts": parts,
        });
        if let Some(application_id) = options.application_id {
            content["applicationId"] = json!(application_id);
        }
        if let Some(sender_id) = options.sender_id {
            content["senderId"] = json!(sender_id);
        }
        if let Some(name) = &options.sender_display_name {
            content["senderDisplayName"] = json!(name);
        }
        let mut body = json!({ "content": content });
        if let Some(tag) = options.moderation_tag() {
            body["moderation"] = json!(tag);
        }

        let path = format!("/content/item/moderate/{}", options.content_id);
        let request = self.request(method, &path, Some(body));
        self.send(request).await?;
        Ok(())
    }

    /// Flag a content item on behalf of a reporter.
    pub async fn flag_content(
        &self,
        content_id: Uuid,
        reporter_id: Uuid,
        options: &FlagOptions,
    ) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }

        if let Some(queue) = self.queue.clone() {
            let payload = json!({
                "contentId": content_id,
                "reporterId": reporter_id,
                "opts": options,
            });
            return self.enqueue(&queue, JobKind::FlagContent, payload).await;
        }

        let mut flag = json!({
            "reporterId": reporter_id,
            "createInstant": now_millis(),
        });
        if let Some(reason) = &options.reason {
            flag["reason"] = json!(reason);
        }
        if let Some(comment) = &options.comment {
            flag["comment"] = json!(comment);
        }

        let path = format!("/content/item/flag/{content_id}");
        let request = self.request(Method::POST, &path, Some(json!({ "flag": flag })));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ModerateOptions {
        ModerateOptions::new(Uuid::new_v4())
    }

    #[test]
    fn alert_tag_beats_approval_tag() {
        let mut opts = options();
        opts.generates_alert = true;
        opts.requires_approval = true;
        assert_eq!(opts.moderation_tag(), Some("generatesAlert"));
    }

    #[test]
    fn approval_tag_when_alert_unset() {
        let mut opts = options();
        opts.requires_approval = true;
        assert_eq!(opts.moderation_tag(), Some("requiresApproval"));
    }

    #[test]
    fn untagged_when_neither_flag_set() {
        assert_eq!(options().moderation_tag(), None);
    }

    #[test]
    fn moderate_options_serialize_camel_case_and_skip_false_flags() {
        let opts = ModerateOptions::new(Uuid::nil());
        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(
            value,
            json!({"contentId": "00000000-0000-0000-0000-000000000000"})
        );
    }

    #[test]
    fn content_part_type_serializes_lowercase() {
        let part = ContentPart {
            name: "body".into(),
            content: "hi".into(),
            part_type: ContentType::Hyperlink,
        };
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["type"], "hyperlink");
    }
}
