use std::future::Future;

use contact_models::{
    message::{ContactMessage, ContactMessageFilter, ContactMessageId},
    pagination::PaginationSlice,
};

/// Narrow interface over the contact message collection. Store-specific
/// query syntax stays behind this trait.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactMessageRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Returns the number of messages matching the given filter.
    fn count(
        &self,
        txn: &mut Txn,
        filter: &ContactMessageFilter,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// Returns all messages matching the given filter and pagination slice.
    ///
    /// The pagination values are applied verbatim; callers validate them.
    fn list(
        &self,
        txn: &mut Txn,
        filter: &ContactMessageFilter,
        pagination: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<ContactMessage>>> + Send;

    /// Returns the message with the given id, if it exists.
    fn get(
        &self,
        txn: &mut Txn,
        id: ContactMessageId,
    ) -> impl Future<Output = anyhow::Result<Option<ContactMessage>>> + Send;

    /// Persists a fully constructed message.
    fn create(
        &self,
        txn: &mut Txn,
        message: &ContactMessage,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactMessageRepository<Txn> {
    pub fn with_count(mut self, filter: ContactMessageFilter, result: u64) -> Self {
        self.expect_count()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(filter))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(
        mut self,
        filter: ContactMessageFilter,
        pagination: contact_models::pagination::PaginationSlice,
        result: Vec<ContactMessage>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(filter),
                mockall::predicate::eq(pagination),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get(mut self, id: ContactMessageId, result: Option<ContactMessage>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(id))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create(mut self, message: ContactMessage) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(message),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_create_error(mut self, message: ContactMessage) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(message),
            )
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!("database error"))))
            });
        self
    }
}
