//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError};

use relay_core::types::{ApplicationId, DeliveryId, GroupId, NotificationId, RecipientId, UserId};
use relay_entity::group::GroupMember;
use relay_service::application::{ApplicationInput, ApplicationPatch};
use relay_service::group::{GroupInput, GroupPatch};
use relay_service::notification::{IncomingWebhook, NewNotification};
use relay_service::recipient::{RecipientInput, RecipientPatch};
use relay_service::tracking::OpenEvent;

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authoring request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub jira_release_notes: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
    /// Origin label, `pm_created` when absent.
    pub source: Option<String>,
    /// Sent to immediately unless this is a draft.
    #[serde(default)]
    pub recipient_ids: Vec<RecipientId>,
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            jira_release_notes: req.jira_release_notes,
            is_draft: req.is_draft,
            source: req.source,
            recipient_ids: req.recipient_ids,
        }
    }
}

/// Notification pushed by an external producer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub target_email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub jira_release_notes: Option<String>,
    pub metadata: Option<Value>,
}

impl From<WebhookRequest> for IncomingWebhook {
    fn from(req: WebhookRequest) -> Self {
        Self {
            target_email: req.target_email,
            title: req.title,
            content: req.content,
            jira_release_notes: req.jira_release_notes,
            metadata: req.metadata,
        }
    }
}

/// Edit, status change, and/or action. Status and action are parsed by
/// the handler so bad values become validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationRequest {
    pub content: Option<String>,
    pub status: Option<String>,
    pub action: Option<String>,
}

/// Direct send request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub recipient_ids: Vec<RecipientId>,
}

/// Bulk send request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBulkRequest {
    #[serde(default)]
    pub group_ids: Vec<GroupId>,
    #[serde(default)]
    pub application_ids: Vec<ApplicationId>,
}

/// Open callback from an external application.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackOpenRequest {
    pub delivery_record_id: Option<DeliveryId>,
    pub notification_id: Option<NotificationId>,
    pub user_id: Option<UserId>,
    #[validate(custom(function = "email_or_blank"))]
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub application_id: Option<ApplicationId>,
    pub application_name: Option<String>,
    pub opened_at: Option<DateTime<Utc>>,
}

impl From<TrackOpenRequest> for OpenEvent {
    fn from(req: TrackOpenRequest) -> Self {
        Self {
            delivery_id: req.delivery_record_id,
            notification_id: req.notification_id,
            user_id: req.user_id,
            user_email: req.user_email,
            user_name: req.user_name,
            application_id: req.application_id,
            application_name: req.application_name,
            opened_at: req.opened_at,
        }
    }
}

/// Create recipient request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipientRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "email_or_blank"))]
    pub email: String,
    #[serde(default)]
    pub role: String,
    pub group_id: Option<GroupId>,
}

impl From<CreateRecipientRequest> for RecipientInput {
    fn from(req: CreateRecipientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            group_id: req.group_id,
        }
    }
}

/// Update recipient request. `groupId: null` clears the group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipientRequest {
    pub name: Option<String>,
    #[validate(custom(function = "email_or_blank"))]
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub group_id: Option<Option<GroupId>>,
}

impl From<UpdateRecipientRequest> for RecipientPatch {
    fn from(req: UpdateRecipientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            group_id: req.group_id,
        }
    }
}

/// Create group request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "hex_color_or_blank"))]
    pub color: Option<String>,
    #[serde(default)]
    pub users: Vec<GroupMember>,
    #[serde(default)]
    pub application_ids: Vec<ApplicationId>,
}

impl From<CreateGroupRequest> for GroupInput {
    fn from(req: CreateGroupRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            color: req.color,
            users: req.users,
            application_ids: req.application_ids,
        }
    }
}

/// Update group request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "hex_color_or_blank"))]
    pub color: Option<String>,
    pub users: Option<Vec<GroupMember>>,
    pub application_ids: Option<Vec<ApplicationId>>,
}

impl From<UpdateGroupRequest> for GroupPatch {
    fn from(req: UpdateGroupRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            color: req.color,
            users: req.users,
            application_ids: req.application_ids,
        }
    }
}

/// Register application request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "url_or_blank"))]
    pub base_url: String,
    pub notification_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub active_users: Option<u64>,
    pub description: Option<String>,
}

impl From<CreateApplicationRequest> for ApplicationInput {
    fn from(req: CreateApplicationRequest) -> Self {
        Self {
            name: req.name,
            base_url: req.base_url,
            notification_endpoint: req.notification_endpoint,
            api_key: req.api_key,
            active_users: req.active_users,
            description: req.description,
        }
    }
}

/// Update application request. `status` is parsed by the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub name: Option<String>,
    #[validate(custom(function = "url_or_blank"))]
    pub base_url: Option<String>,
    pub notification_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub status: Option<String>,
    pub active_users: Option<u64>,
    pub description: Option<String>,
}

impl UpdateApplicationRequest {
    /// Converts into a patch once `status` has been parsed.
    pub fn into_patch(self, status: Option<relay_entity::application::ApplicationStatus>) -> ApplicationPatch {
        ApplicationPatch {
            name: self.name,
            base_url: self.base_url,
            notification_endpoint: self.notification_endpoint,
            api_key: self.api_key,
            status,
            active_users: self.active_users,
            description: self.description,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Blank values pass; required-field checks belong to the services.
fn email_or_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message("Invalid email address".into()))
}

fn url_or_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message("baseUrl must be an absolute URL".into()))
}

fn hex_color_or_blank(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = value.is_empty()
        || value.strip_prefix('#').is_some_and(|hex| {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });
    if valid {
        return Ok(());
    }
    Err(ValidationError::new("color").with_message("Color must be a hex value like #007bff".into()))
}
