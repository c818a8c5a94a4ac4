//! Notification lifecycle orchestration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use relay_core::error::AppError;
use relay_core::types::{ApplicationId, GroupId, NotificationId, RecipientId};
use relay_database::repositories::{
    DeliveryRepository, EditHistoryRepository, NotificationRepository,
};
use relay_entity::delivery::{DeliveryRecord, DeliveryScope, NamedRef};
use relay_entity::history::{EditHistoryEntry, EditType};
use relay_entity::normalize_email;
use relay_entity::notification::metadata::PM_CREATED_SOURCE;
use relay_entity::notification::{
    Addressee, AuthoredMetadata, ExternalMetadata, Notification, NotificationAction,
    NotificationMetadata, NotificationStatus, NotificationView, SentVia,
};
use relay_entity::recipient::Recipient;
use relay_entity::tracking::TrackingAggregate;
use relay_realtime::{OutboundEvent, PushChannelRegistry};

use super::input::{
    BulkSendOutcome, BulkSendSummary, CreateOutcome, GroupSummary, IncomingWebhook,
    NewNotification, NotificationUpdate,
};
use super::rules::NotificationRules;
use crate::context::RequestContext;
use crate::dispatch::DispatchEngine;
use crate::resolution::RecipientResolver;

/// Creates, edits, and sends notifications.
///
/// Every write is committed before anything is pushed to a live channel,
/// and push failures never fail the write.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
    history: EditHistoryRepository,
    deliveries: DeliveryRepository,
    resolver: RecipientResolver,
    dispatcher: DispatchEngine,
    channels: Arc<PushChannelRegistry>,
    rules: NotificationRules,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: NotificationRepository,
        history: EditHistoryRepository,
        deliveries: DeliveryRepository,
        resolver: RecipientResolver,
        dispatcher: DispatchEngine,
        channels: Arc<PushChannelRegistry>,
        rules: NotificationRules,
    ) -> Self {
        Self {
            notifications,
            history,
            deliveries,
            resolver,
            dispatcher,
            channels,
            rules,
        }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<NotificationView>, AppError> {
        let owned = self.notifications.list_for_owner(&ctx.email).await?;
        Ok(owned.into_iter().map(NotificationView::from).collect())
    }

    /// Gets one of the caller's notifications.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> Result<NotificationView, AppError> {
        self.owned(ctx, id).await.map(NotificationView::from)
    }

    /// Authors a notification owned by the caller.
    ///
    /// A non-draft with recipients is sent to them in the same operation.
    /// Recipients are resolved before anything is stored.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewNotification,
    ) -> Result<CreateOutcome, AppError> {
        let title = self.rules.title(&input.title)?;
        self.rules.content(&input.content)?;

        let recipients = if !input.is_draft && !input.recipient_ids.is_empty() {
            let found = self.resolver.resolve_recipients(&input.recipient_ids).await?;
            if found.is_empty() {
                return Err(AppError::validation("No valid recipients selected"));
            }
            found
        } else {
            Vec::new()
        };

        let now = Utc::now();
        let metadata = NotificationMetadata::PmCreated(AuthoredMetadata {
            source: input
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PM_CREATED_SOURCE.to_string()),
            is_draft: input.is_draft,
            created_by: ctx.name.clone(),
        });
        let status = if input.is_draft {
            NotificationStatus::Draft
        } else {
            NotificationStatus::Unread
        };

        let created = self
            .notifications
            .create(|id| Notification {
                id,
                target_email: ctx.email.clone(),
                title,
                content: input.content,
                jira_release_notes: input.jira_release_notes.unwrap_or_default(),
                metadata,
                status,
                action: None,
                action_date: None,
                sent_to: Vec::new(),
                sent_at: None,
                sent_via: None,
                tracking: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            notification_id = %created.id,
            user = %ctx.email,
            draft = input.is_draft,
            "Notification created"
        );

        if recipients.is_empty() {
            self.push(&created);
            return Ok(CreateOutcome {
                notification: created,
                delivery: None,
            });
        }

        let (notification, delivery) = self.deliver_direct(ctx, &created, recipients).await?;
        self.push(&notification);
        Ok(CreateOutcome {
            notification,
            delivery: Some(delivery),
        })
    }

    /// Ingests a notification from an external producer.
    ///
    /// Needs no session. The notification is always `unread` and tagged
    /// `external`.
    pub async fn ingest_webhook(&self, input: IncomingWebhook) -> Result<Notification, AppError> {
        let target_email = normalize_email(&input.target_email);
        if target_email.is_empty() || input.title.trim().is_empty() || input.content.is_empty() {
            return Err(AppError::validation("Missing required fields"));
        }
        let title = self.rules.title(&input.title)?;
        self.rules.content(&input.content)?;
        let metadata = ExternalMetadata::from_payload(input.metadata)
            .map_err(|e| AppError::validation(format!("Invalid metadata: {e}")))?;

        let now = Utc::now();
        let created = self
            .notifications
            .create(|id| Notification {
                id,
                target_email,
                title,
                content: input.content,
                jira_release_notes: input.jira_release_notes.unwrap_or_default(),
                metadata: NotificationMetadata::External(metadata),
                status: NotificationStatus::Unread,
                action: None,
                action_date: None,
                sent_to: Vec::new(),
                sent_at: None,
                sent_via: None,
                tracking: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            notification_id = %created.id,
            user = %created.target_email,
            title = %created.title,
            "External notification ingested"
        );
        self.push(&created);
        Ok(created)
    }

    /// Applies a content edit, status change, and/or action.
    ///
    /// Everything is validated before anything changes. A content edit
    /// that matches the current content is ignored; a real one is
    /// historized first.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
        update: NotificationUpdate,
    ) -> Result<NotificationView, AppError> {
        let current = self.owned(ctx, id).await?;
        if update.is_empty() {
            return Ok(NotificationView::from(current));
        }

        let new_content = update
            .content
            .filter(|content| *content != current.content);
        if let Some(content) = &new_content {
            self.rules.content(content)?;
        }
        if let Some(next) = update.status {
            if !current.status.allows_manual_transition(next) {
                return Err(AppError::validation(format!(
                    "Cannot change status from {} to {next}",
                    current.status
                )));
            }
        }

        let now = Utc::now();
        let editor = ctx.email.clone();
        let applied = self.notifications.modify(id, |n| {
            let mut changed = false;
            let mut edit = None;

            if let Some(content) = new_content {
                if content != n.content {
                    let original = std::mem::replace(&mut n.content, content);
                    edit = Some((original, n.content.clone()));
                    changed = true;
                }
            }
            if let Some(next) = update.status {
                if n.status != next && n.status.allows_manual_transition(next) {
                    n.status = next;
                    changed = true;
                }
            }
            if let Some(action) = update.action {
                n.action = Some(action);
                n.action_date = Some(now);
                if action == NotificationAction::Rejected {
                    n.status = NotificationStatus::Rejected;
                }
                changed = true;
            }
            if changed {
                n.updated_at = now;
            }
            (n.clone(), edit)
        });
        let Some((notification, edit)) = applied else {
            return Err(AppError::not_found("Notification not found"));
        };

        if let Some((original_content, edited_content)) = edit {
            self.history
                .append(|entry_id| EditHistoryEntry {
                    id: entry_id,
                    notification_id: id,
                    user_email: editor,
                    original_content,
                    edited_content,
                    edit_type: EditType::Manual,
                    created_at: now,
                })
                .await?;
            debug!(notification_id = %id, "Content edit recorded");
        }

        Ok(NotificationView::from(notification))
    }

    /// Edit history of one of the caller's notifications, oldest first.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> Result<Vec<EditHistoryEntry>, AppError> {
        self.owned(ctx, id).await?;
        self.history.find_by_notification(id).await
    }

    /// Sends a notification to first-party recipients.
    ///
    /// Unknown recipient ids are dropped; none left is an error. Nothing
    /// is dispatched externally.
    pub async fn send_to_recipients(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
        recipient_ids: &[RecipientId],
    ) -> Result<DeliveryRecord, AppError> {
        let notification = self.sendable(ctx, id).await?;
        if recipient_ids.is_empty() {
            return Err(AppError::validation("Please select at least one recipient"));
        }
        let recipients = self.resolver.resolve_recipients(recipient_ids).await?;
        if recipients.is_empty() {
            return Err(AppError::validation("No valid recipients selected"));
        }

        let (notification, delivery) = self.deliver_direct(ctx, &notification, recipients).await?;
        self.push(&notification);
        Ok(delivery)
    }

    /// Sends a notification to the users of some groups through some
    /// applications.
    ///
    /// Per-application failures are recorded in the results and never
    /// abort the send.
    pub async fn send_bulk(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
        group_ids: &[GroupId],
        application_ids: &[ApplicationId],
    ) -> Result<BulkSendOutcome, AppError> {
        let notification = self.sendable(ctx, id).await?;
        if group_ids.is_empty() {
            return Err(AppError::validation("Please select at least one group"));
        }
        if application_ids.is_empty() {
            return Err(AppError::validation(
                "Please select at least one application",
            ));
        }

        let audience = self.resolver.resolve_group_users(group_ids).await?;
        if audience.is_empty() {
            return Err(AppError::validation("No users found in selected groups"));
        }
        let applications = self.resolver.resolve_applications(application_ids).await?;
        if applications.is_empty() {
            return Err(AppError::validation("No valid applications selected"));
        }

        let outcome = self
            .dispatcher
            .dispatch(
                &notification,
                &applications,
                &audience.users,
                &audience.groups,
                &ctx.email,
            )
            .await;

        let total_users = audience.users.len();
        let now = Utc::now();
        let delivery = self
            .deliveries
            .create(|delivery_id| DeliveryRecord {
                id: delivery_id,
                notification_id: notification.id,
                sent_by: ctx.email.clone(),
                title: notification.title.clone(),
                content: notification.content.clone(),
                scope: DeliveryScope::Bulk {
                    groups: audience.groups.iter().map(|g| g.snapshot()).collect(),
                    applications: applications.iter().map(|a| a.snapshot()).collect(),
                    users: audience.users.clone(),
                    total_users,
                    results: outcome.results.clone(),
                },
                tracking: Some(TrackingAggregate::new(total_users)),
                created_at: now,
            })
            .await?;

        let sent_to: Vec<Addressee> = audience
            .users
            .iter()
            .map(|u| Addressee {
                user_id: u.user_id.value(),
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .collect();
        let sent_via = SentVia {
            delivery_id: delivery.id,
            groups: audience
                .groups
                .iter()
                .map(|g| NamedRef::new(g.id, &g.name))
                .collect(),
            applications: applications
                .iter()
                .map(|a| NamedRef::new(a.id, &a.name))
                .collect(),
        };
        self.notifications
            .modify(notification.id, |n| {
                n.mark_sent(sent_to, now);
                n.sent_via = Some(sent_via.clone());
            })
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        // Re-mirror under the record lock so an open that raced the send
        // is not lost on the notification.
        let notifications = self.notifications.clone();
        self.deliveries
            .update_tracking(delivery.id, |notification_id, tracking| {
                notifications.mirror_tracking(notification_id, delivery.id, tracking)
            })?;

        let summary = BulkSendSummary {
            total_applications: outcome.total(),
            successful_applications: outcome.successful(),
            failed_applications: outcome.failed(),
            total_users,
            groups: audience
                .groups
                .iter()
                .map(|g| GroupSummary {
                    id: g.id,
                    name: g.name.clone(),
                    user_count: g.users.len(),
                })
                .collect(),
            applications: sent_via.applications,
        };

        info!(
            notification_id = %notification.id,
            delivery_id = %delivery.id,
            applications = summary.total_applications,
            successful = summary.successful_applications,
            failed = summary.failed_applications,
            users = total_users,
            "Bulk send completed"
        );

        if let Some(stored) = self.notifications.find_by_id(notification.id).await? {
            self.push(&stored);
        }

        Ok(BulkSendOutcome {
            delivery,
            summary,
            results: outcome.results,
        })
    }

    async fn owned(&self, ctx: &RequestContext, id: NotificationId) -> Result<Notification, AppError> {
        self.notifications
            .find_for_owner(id, &ctx.email)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    async fn sendable(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> Result<Notification, AppError> {
        let notification = self.owned(ctx, id).await?;
        if !notification.status.is_sendable() {
            return Err(AppError::validation(
                "Rejected notifications cannot be sent",
            ));
        }
        Ok(notification)
    }

    async fn deliver_direct(
        &self,
        ctx: &RequestContext,
        notification: &Notification,
        recipients: Vec<Recipient>,
    ) -> Result<(Notification, DeliveryRecord), AppError> {
        let now = Utc::now();
        let delivery = self
            .deliveries
            .create(|delivery_id| DeliveryRecord {
                id: delivery_id,
                notification_id: notification.id,
                sent_by: ctx.email.clone(),
                title: notification.title.clone(),
                content: notification.content.clone(),
                scope: DeliveryScope::Direct {
                    recipients: recipients.iter().map(|r| r.snapshot()).collect(),
                },
                tracking: None,
                created_at: now,
            })
            .await?;

        let sent_to: Vec<Addressee> = recipients
            .iter()
            .map(|r| Addressee {
                user_id: r.id.value(),
                name: r.name.clone(),
                email: r.email.clone(),
            })
            .collect();
        let updated = self
            .notifications
            .modify(notification.id, |n| {
                n.mark_sent(sent_to, now);
                n.clone()
            })
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        info!(
            notification_id = %notification.id,
            delivery_id = %delivery.id,
            recipients = recipients.len(),
            "Release notes sent to recipients"
        );
        Ok((updated, delivery))
    }

    fn push(&self, notification: &Notification) {
        let delivered = self.channels.send(
            &notification.target_email,
            OutboundEvent::Notification {
                data: NotificationView::from(notification.clone()),
            },
        );
        debug!(
            notification_id = %notification.id,
            user = %notification.target_email,
            delivered,
            "Notification pushed"
        );
    }
}
