//! Origin-specific notification metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label recorded on notifications authored in the relay itself.
pub const PM_CREATED_SOURCE: &str = "pm_created";

/// Metadata block of a notification, keyed by where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum NotificationMetadata {
    /// Authored by a product manager through the relay.
    PmCreated(AuthoredMetadata),
    /// Received through the ingestion webhook.
    External(ExternalMetadata),
}

impl NotificationMetadata {
    /// The origin tag.
    pub fn origin(&self) -> &'static str {
        match self {
            Self::PmCreated(_) => "pm_created",
            Self::External(_) => "external",
        }
    }

    /// Source label shown to clients.
    pub fn source(&self) -> &str {
        match self {
            Self::PmCreated(meta) => &meta.source,
            Self::External(_) => "external",
        }
    }

    /// Display name of the author, when known.
    pub fn created_by(&self) -> Option<&str> {
        match self {
            Self::PmCreated(meta) => Some(&meta.created_by),
            Self::External(_) => None,
        }
    }
}

/// Metadata of an authored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredMetadata {
    /// Free-form source label chosen by the author's client.
    pub source: String,
    /// Whether the notification was saved as a draft.
    pub is_draft: bool,
    /// Author display name.
    pub created_by: String,
}

/// Metadata of a webhook-ingested notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMetadata {
    /// Release version, e.g. `2.5.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Release date as sent by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Issue keys referenced by the release.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jira_issues: Vec<String>,
    /// Any other producer-supplied fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExternalMetadata {
    /// Builds metadata from an arbitrary webhook payload.
    ///
    /// Non-object payloads yield empty metadata. Producer attempts to set
    /// `source` or `origin` are discarded.
    pub fn from_payload(payload: Option<Value>) -> Result<Self, serde_json::Error> {
        let Some(value @ Value::Object(_)) = payload else {
            return Ok(Self::default());
        };
        let mut meta: Self = serde_json::from_value(value)?;
        meta.extra.remove("source");
        meta.extra.remove("origin");
        Ok(meta)
    }
}
