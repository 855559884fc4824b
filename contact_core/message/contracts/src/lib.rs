use std::future::Future;

use contact_auth_contracts::AuthenticateError;
use contact_forms::ContactMessageCreationForm;
use contact_models::{
    message::{ContactMessage, ContactMessageFilter, ContactMessageId},
    pagination::PaginationSlice,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactMessageFeatureService: Send + Sync + 'static {
    /// Builds a message from a resolved form and persists it in one call.
    fn create(
        &self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
    ) -> impl Future<Output = Result<ContactMessage, ContactMessageCreateError>> + Send;

    /// Asynchronous intake: pre-generates the id, hands the fully built
    /// message to the topic and acknowledges immediately. Nothing is
    /// persisted in this call.
    fn publish(
        &self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
    ) -> impl Future<Output = Result<ContactMessagePublishedAck, ContactMessagePublishError>> + Send;

    /// Downstream half of the asynchronous intake: stores the already
    /// identified record verbatim, without re-validation.
    fn persist_published(
        &self,
        event: ContactMessageCreatedEvent,
    ) -> impl Future<Output = Result<(), ContactMessagePersistPublishedError>> + Send;

    fn get(
        &self,
        token: &str,
        id: ContactMessageId,
    ) -> impl Future<Output = Result<ContactMessage, ContactMessageGetError>> + Send;

    fn list(
        &self,
        token: &str,
        query: ContactMessageListQuery,
    ) -> impl Future<Output = Result<ContactMessageListResult, ContactMessageListError>> + Send;
}

/// Request-scoped sender identity, captured by the transport layer. Missing
/// pieces fall back to the literal `"unknown"` when the message is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestIdentity {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageCreatedEvent {
    pub message: ContactMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactMessagePublishedAck {
    pub contact_message_id: ContactMessageId,
    pub publish_confirmation_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactMessageListQuery {
    pub filter: ContactMessageFilter,
    pub pagination: PaginationSlice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageListResult {
    pub total: u64,
    pub items: Vec<ContactMessage>,
}

#[derive(Debug, Error)]
pub enum ContactMessageCreateError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactMessagePublishError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactMessagePersistPublishedError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactMessageGetError {
    #[error(transparent)]
    Auth(#[from] AuthenticateError),
    #[error("The contact message {id} does not exist.")]
    NotFound { id: ContactMessageId },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactMessageListError {
    #[error(transparent)]
    Auth(#[from] AuthenticateError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactMessageFeatureService {
    pub fn with_create(
        mut self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
        result: ContactMessage,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::eq(form),
                mockall::predicate::eq(identity),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_publish(
        mut self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
        result: ContactMessagePublishedAck,
    ) -> Self {
        self.expect_publish()
            .once()
            .with(
                mockall::predicate::eq(form),
                mockall::predicate::eq(identity),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_persist_published(mut self, event: ContactMessageCreatedEvent) -> Self {
        self.expect_persist_published()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_get(
        mut self,
        token: &'static str,
        id: ContactMessageId,
        result: Result<ContactMessage, ContactMessageGetError>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(token), mockall::predicate::eq(id))
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list(
        mut self,
        token: &'static str,
        query: ContactMessageListQuery,
        result: Result<ContactMessageListResult, ContactMessageListError>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(token), mockall::predicate::eq(query))
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
