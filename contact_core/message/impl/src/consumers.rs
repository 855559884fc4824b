use std::sync::Arc;

use contact_bus_contracts::EventSubscriber;
use contact_core_message_contracts::{ContactMessageCreatedEvent, ContactMessageFeatureService};
use contact_email_contracts::{Email, EmailService};
use contact_models::{email_address::EmailAddress, message::ContactMessage};
use tokio::task::JoinHandle;
use tracing::error;

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Recipient of the follow-up notification email.
    pub notification_email: EmailAddress,
}

/// Wires the two independent consumers of the created-message topic: one
/// persisting each event, one sending the notification email. The legs do
/// not coordinate; a failed event is logged and dropped.
///
/// Both tasks run until the topic is closed.
pub fn spawn_consumers<Svc, EmailS>(
    service: Arc<Svc>,
    email: Arc<EmailS>,
    config: ConsumerConfig,
    persist_events: impl EventSubscriber<ContactMessageCreatedEvent>,
    notify_events: impl EventSubscriber<ContactMessageCreatedEvent>,
) -> (JoinHandle<()>, JoinHandle<()>)
where
    Svc: ContactMessageFeatureService,
    EmailS: EmailService,
{
    (
        tokio::spawn(persist_consumer(service, persist_events)),
        tokio::spawn(notify_consumer(email, config, notify_events)),
    )
}

async fn persist_consumer<Svc: ContactMessageFeatureService>(
    service: Arc<Svc>,
    mut events: impl EventSubscriber<ContactMessageCreatedEvent>,
) {
    while let Some(event) = events.recv().await {
        let id = event.message.id;
        if let Err(err) = service.persist_published(event).await {
            error!(%id, "Failed to persist published contact message: {err:#}");
        }
    }
}

async fn notify_consumer<EmailS: EmailService>(
    email: Arc<EmailS>,
    config: ConsumerConfig,
    mut events: impl EventSubscriber<ContactMessageCreatedEvent>,
) {
    while let Some(event) = events.recv().await {
        let id = event.message.id;
        match email.send(notification_email(&config, event.message)).await {
            Ok(true) => (),
            Ok(false) => error!(%id, "Notification email was rejected"),
            Err(err) => error!(%id, "Failed to send notification email: {err:#}"),
        }
    }
}

fn notification_email(config: &ConsumerConfig, message: ContactMessage) -> Email {
    Email {
        recipient: config.notification_email.clone(),
        subject: format!("[Contact Form] {}", message.reason),
        body: format!(
            "Message from {} ({}):\n\n{}",
            *message.sender.alias, message.sender.email, *message.message
        ),
        reply_to: Some(message.sender.email),
    }
}
