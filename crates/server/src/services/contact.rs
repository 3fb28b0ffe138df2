//! Contact intake: validate, persist, notify.
//!
//! A message that passed validation is always stored before the notification
//! is attempted, and a failed notification never removes it. What the caller
//! sees after a failed notification depends on [`NotifyFailurePolicy`].

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use super::{
    content::ContentStore,
    mailer::{Notification, Notifier},
};
use crate::{
    config::NotifyFailurePolicy,
    db::{inputs::ContactForm, inputs::Input, models::ContactMessage},
    error::{AppError, FieldErrors},
};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact form is invalid")]
    Validation(FieldErrors),

    /// The message was stored but the notification could not be sent.
    #[error("message {message_id} stored but notification failed: {reason}")]
    Notification { message_id: String, reason: String },

    #[error(transparent)]
    Store(AppError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent,
    /// Only produced under [`NotifyFailurePolicy::Warn`].
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ContactReceipt {
    pub message: ContactMessage,
    pub notification: NotificationStatus,
}

#[derive(Clone)]
pub struct ContactIntake {
    store: ContentStore,
    notifier: Arc<dyn Notifier>,
    recipient: String,
    policy: NotifyFailurePolicy,
}

impl ContactIntake {
    pub fn new(
        store: ContentStore,
        notifier: Arc<dyn Notifier>,
        recipient: String,
        policy: NotifyFailurePolicy,
    ) -> Self {
        Self {
            store,
            notifier,
            recipient,
            policy,
        }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<ContactReceipt, ContactError> {
        let form = match form.clean() {
            Ok(form) => form,
            Err(AppError::InvalidFields(fields)) => return Err(ContactError::Validation(fields)),
            Err(other) => return Err(ContactError::Store(other)),
        };

        let message = self
            .store
            .create_contact_message(&form, Utc::now())
            .await
            .map_err(ContactError::Store)?;
        tracing::info!(message_id = %message.id, "Contact message stored");

        let notification = notification_for(&message, &self.recipient);
        match self.notifier.send(&notification).await {
            Ok(()) => Ok(ContactReceipt {
                message,
                notification: NotificationStatus::Sent,
            }),
            Err(e) => match self.policy {
                NotifyFailurePolicy::Fail => {
                    tracing::error!(message_id = %message.id, "Contact notification failed: {e}");
                    Err(ContactError::Notification {
                        message_id: message.id,
                        reason: e.to_string(),
                    })
                }
                NotifyFailurePolicy::Warn => {
                    tracing::warn!(message_id = %message.id, "Contact notification failed: {e}");
                    Ok(ContactReceipt {
                        message,
                        notification: NotificationStatus::Failed(e.to_string()),
                    })
                }
            },
        }
    }
}

pub fn notification_for(message: &ContactMessage, recipient: &str) -> Notification {
    Notification {
        recipient: recipient.to_string(),
        subject: format!("New Contact Message from {}", message.name),
        body: format!(
            "You have received a new message from your website.\n\n\
             Name: {}\n\
             Email: {}\n\
             Subject: {}\n\n\
             Message:\n{}\n",
            message.name, message.email, message.subject, message.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        db::Database,
        services::{content::ListFilter, mailer::NotifyError},
    };

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                return Err(NotifyError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    async fn intake(
        fail: bool,
        policy: NotifyFailurePolicy,
    ) -> (ContactIntake, ContentStore, Arc<RecordingNotifier>) {
        let db = Database::in_memory().await.unwrap();
        let store = ContentStore::new(db.pool);
        let notifier = Arc::new(RecordingNotifier {
            fail,
            ..Default::default()
        });
        let intake = ContactIntake::new(
            store.clone(),
            notifier.clone(),
            "owner@example.com".to_string(),
            policy,
        );
        (intake, store, notifier)
    }

    fn ada() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Hi there".to_string(),
        }
    }

    async fn stored(store: &ContentStore) -> Vec<ContactMessage> {
        store
            .list_contact_messages(&ListFilter::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn happy_path_persists_and_notifies() {
        let (intake, store, notifier) = intake(false, NotifyFailurePolicy::Fail).await;
        let before = Utc::now();

        let receipt = intake.submit(ada()).await.unwrap();
        let after = Utc::now();

        assert_eq!(receipt.notification, NotificationStatus::Sent);
        let messages = stored(&store).await;
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert!(!message.is_read);
        assert_eq!(message.subject, "Hello");
        assert!(message.created_at >= before && message.created_at <= after);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "owner@example.com");
        assert_eq!(sent[0].subject, "New Contact Message from Ada");
        for field in ["Ada", "ada@example.com", "Hello", "Hi there"] {
            assert!(sent[0].body.contains(field), "body is missing {field}");
        }
    }

    #[tokio::test]
    async fn invalid_form_persists_nothing_and_sends_nothing() {
        let (intake, store, notifier) = intake(false, NotifyFailurePolicy::Fail).await;
        let form = ContactForm {
            name: String::new(),
            email: "not-an-email".to_string(),
            subject: "x".repeat(201),
            message: String::new(),
        };

        match intake.submit(form).await {
            Err(ContactError::Validation(fields)) => {
                let names: Vec<_> = fields.fields().collect();
                assert_eq!(names, vec!["email", "message", "name", "subject"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(stored(&store).await.is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_notification_keeps_message_and_reports_error() {
        let (intake, store, notifier) = intake(true, NotifyFailurePolicy::Fail).await;

        let result = intake.submit(ada()).await;

        let messages = stored(&store).await;
        assert_eq!(messages.len(), 1);
        match result {
            Err(ContactError::Notification { message_id, .. }) => {
                assert_eq!(message_id, messages[0].id)
            }
            other => panic!("expected notification error, got {other:?}"),
        }
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn warn_policy_reports_success_with_warning() {
        let (intake, store, _) = intake(true, NotifyFailurePolicy::Warn).await;

        let receipt = intake.submit(ada()).await.unwrap();

        assert!(matches!(receipt.notification, NotificationStatus::Failed(_)));
        assert_eq!(stored(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn input_is_trimmed_before_storing() {
        let (intake, store, _) = intake(false, NotifyFailurePolicy::Fail).await;
        let mut form = ada();
        form.name = "  Ada  ".to_string();

        intake.submit(form).await.unwrap();

        assert_eq!(stored(&store).await[0].name, "Ada");
    }
}
