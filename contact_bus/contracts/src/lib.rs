use std::future::Future;

use uuid::Uuid;

/// Fan-out topic producer. Every published event is delivered to all
/// current subscribers of the topic.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EventPublisher<E: Send + Sync + 'static>: Send + Sync + 'static {
    fn publish(&self, event: E) -> impl Future<Output = anyhow::Result<PublishReceipt>> + Send;
}

/// Consuming end of a topic. `recv` resolves to `None` once the topic has
/// been closed.
pub trait EventSubscriber<E: Send + 'static>: Send + 'static {
    fn recv(&mut self) -> impl Future<Output = Option<E>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    pub confirmation_id: Uuid,
}

#[cfg(feature = "mock")]
impl<E: std::fmt::Debug + PartialEq + Send + Sync + 'static> MockEventPublisher<E> {
    pub fn with_publish(mut self, event: E, receipt: PublishReceipt) -> Self {
        self.expect_publish()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(move |_| Box::pin(std::future::ready(Ok(receipt))));
        self
    }

    pub fn with_publish_error(mut self, event: E) -> Self {
        self.expect_publish()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow::anyhow!("topic error")))));
        self
    }
}
