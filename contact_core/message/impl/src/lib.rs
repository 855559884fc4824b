use contact_auth_contracts::ApiAuthService;
use contact_bus_contracts::EventPublisher;
use contact_core_message_contracts::{
    ContactMessageCreateError, ContactMessageCreatedEvent, ContactMessageFeatureService,
    ContactMessageGetError, ContactMessageListError, ContactMessageListQuery,
    ContactMessageListResult, ContactMessagePersistPublishedError, ContactMessagePublishError,
    ContactMessagePublishedAck, RequestIdentity,
};
use contact_forms::ContactMessageCreationForm;
use contact_models::message::{ContactMessage, ContactMessageId, Sender};
use contact_persistence_contracts::{contact_message::ContactMessageRepository, Database,
    Transaction};
use contact_shared_contracts::{IdService, TimeService};

pub mod consumers;

#[cfg(test)]
mod tests;

const UNKNOWN_IDENTITY: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub struct ContactMessageFeatureServiceImpl<Db, Auth, Id, Time, Publish, ContactMessageRepo> {
    pub db: Db,
    pub auth: Auth,
    pub id: Id,
    pub time: Time,
    pub publisher: Publish,
    pub contact_message_repo: ContactMessageRepo,
}

impl<Db, Auth, Id, Time, Publish, ContactMessageRepo>
    ContactMessageFeatureServiceImpl<Db, Auth, Id, Time, Publish, ContactMessageRepo>
where
    Id: IdService,
    Time: TimeService,
{
    /// Turns a resolved form into a full entity: fresh id, both timestamps
    /// set to now, identity injected into the sender.
    fn build_message(
        &self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
    ) -> ContactMessage {
        let now = self.time.now();
        ContactMessage {
            id: self.id.generate().into(),
            message: form.message,
            reason: form.reason,
            archived: false,
            responded: false,
            sender: Sender {
                alias: form.sender.alias,
                phone: form.sender.phone,
                email: form.sender.email,
                ip: identity.ip.unwrap_or_else(|| UNKNOWN_IDENTITY.into()),
                user_agent: identity
                    .user_agent
                    .unwrap_or_else(|| UNKNOWN_IDENTITY.into()),
            },
            readers: Vec::new(),
            time_created: now,
            time_updated: now,
        }
    }
}

impl<Db, Auth, Id, Time, Publish, ContactMessageRepo> ContactMessageFeatureService
    for ContactMessageFeatureServiceImpl<Db, Auth, Id, Time, Publish, ContactMessageRepo>
where
    Db: Database,
    Auth: ApiAuthService,
    Id: IdService,
    Time: TimeService,
    Publish: EventPublisher<ContactMessageCreatedEvent>,
    ContactMessageRepo: ContactMessageRepository<Db::Transaction>,
{
    async fn create(
        &self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
    ) -> Result<ContactMessage, ContactMessageCreateError> {
        let message = self.build_message(form, identity);

        let mut txn = self.db.begin_transaction().await?;
        self.contact_message_repo.create(&mut txn, &message).await?;
        txn.commit().await?;

        Ok(message)
    }

    async fn publish(
        &self,
        form: ContactMessageCreationForm,
        identity: RequestIdentity,
    ) -> Result<ContactMessagePublishedAck, ContactMessagePublishError> {
        let message = self.build_message(form, identity);
        let contact_message_id = message.id;

        let receipt = self
            .publisher
            .publish(ContactMessageCreatedEvent { message })
            .await?;

        Ok(ContactMessagePublishedAck {
            contact_message_id,
            publish_confirmation_id: receipt.confirmation_id,
        })
    }

    async fn persist_published(
        &self,
        event: ContactMessageCreatedEvent,
    ) -> Result<(), ContactMessagePersistPublishedError> {
        let mut txn = self.db.begin_transaction().await?;
        self.contact_message_repo
            .create(&mut txn, &event.message)
            .await?;
        txn.commit().await?;

        Ok(())
    }

    async fn get(
        &self,
        token: &str,
        id: ContactMessageId,
    ) -> Result<ContactMessage, ContactMessageGetError> {
        self.auth.authenticate(token).await?;

        let mut txn = self.db.begin_transaction().await?;
        self.contact_message_repo
            .get(&mut txn, id)
            .await?
            .ok_or(ContactMessageGetError::NotFound { id })
    }

    async fn list(
        &self,
        token: &str,
        query: ContactMessageListQuery,
    ) -> Result<ContactMessageListResult, ContactMessageListError> {
        self.auth.authenticate(token).await?;

        let mut txn = self.db.begin_transaction().await?;
        let total = self
            .contact_message_repo
            .count(&mut txn, &query.filter)
            .await?;
        let items = self
            .contact_message_repo
            .list(&mut txn, &query.filter, query.pagination)
            .await?;

        Ok(ContactMessageListResult { total, items })
    }
}
