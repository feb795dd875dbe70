// Profanity filtering — the one synchronous-by-nature operation.
//
// The service always returns its best replacement text: identical to the
// input when nothing matched, censored when something did. `filtered` is
// derived purely from whether the `matches` collection came back
// non-empty.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ModerationClient;
use crate::error::Result;

/// Options for [`ModerationClient::filter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Blacklist sub-options forwarded under the request's `filter` key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<BlacklistOptions>,
}

/// Blacklist-filter tuning. Each field is omitted from the wire when
/// unset so the service applies the application's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Replacement strategy or literal replacement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

/// What the filter said about one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    /// True when at least one blacklist rule matched.
    pub filtered: bool,
    /// The text with matches replaced; identical to the input when
    /// nothing matched.
    pub replacement: String,
}

#[derive(Deserialize)]
struct FilterResponseBody {
    #[serde(default)]
    matches: Vec<serde_json::Value>,
    replacement: String,
}

/// Decode a 200 filter response into a [`FilterResult`].
pub(crate) fn parse_filter_result(body: &str) -> Result<FilterResult> {
    let decoded: FilterResponseBody = serde_json::from_str(body)?;
    Ok(FilterResult {
        filtered: !decoded.matches.is_empty(),
        replacement: decoded.replacement,
    })
}

impl ModerationClient {
    /// Run `content` through the service's profanity filter.
    ///
    /// When the client is disabled this is a pure identity pass-through:
    /// `{filtered: false, replacement: content}` with zero I/O — never
    /// an error.
    pub async fn filter(&self, content: &str, options: &FilterOptions) -> Result<FilterResult> {
        if self.is_disabled() {
            return Ok(FilterResult {
                filtered: false,
                replacement: content.to_string(),
            });
        }

        let mut body = json!({ "content": content });
        if let Some(blacklist) = &options.blacklist {
            body["filter"] = json!({ "blacklist": blacklist });
        }

        let request = self.request(Method::POST, "/content/item/filter", Some(body));
        let response = self.send(request).await?;
        parse_filter_result(&response.body)
    }
}
