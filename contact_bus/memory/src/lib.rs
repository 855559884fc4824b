use anyhow::anyhow;
use contact_bus_contracts::{EventPublisher, EventSubscriber, PublishReceipt};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

/// In-process broadcast topic. Subscribers only receive events published
/// after they subscribed; a slow subscriber that falls more than `capacity`
/// events behind skips the overwritten ones.
#[derive(Debug, Clone)]
pub struct MemoryTopic<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone + Send + Sync + 'static> MemoryTopic<E> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> MemorySubscription<E> {
        MemorySubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl<E: Clone + Send + Sync + 'static> EventPublisher<E> for MemoryTopic<E> {
    async fn publish(&self, event: E) -> anyhow::Result<PublishReceipt> {
        self.sender
            .send(event)
            .map_err(|_| anyhow!("No subscribers on topic"))?;

        Ok(PublishReceipt {
            confirmation_id: Uuid::new_v4(),
        })
    }
}

pub struct MemorySubscription<E> {
    receiver: broadcast::Receiver<E>,
}

impl<E: Clone + Send + 'static> EventSubscriber<E> for MemorySubscription<E> {
    async fn recv(&mut self) -> Option<E> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged behind topic");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_every_subscriber() {
        // Arrange
        let topic = MemoryTopic::<u32>::new(8);
        let mut first = topic.subscribe();
        let mut second = topic.subscribe();

        // Act
        let receipt_a = topic.publish(7).await.unwrap();
        let receipt_b = topic.publish(42).await.unwrap();

        // Assert
        assert_ne!(receipt_a.confirmation_id, receipt_b.confirmation_id);
        assert_eq!(first.recv().await, Some(7));
        assert_eq!(first.recv().await, Some(42));
        assert_eq!(second.recv().await, Some(7));
        assert_eq!(second.recv().await, Some(42));
    }

    #[tokio::test]
    async fn publish_without_subscribers_fails() {
        let topic = MemoryTopic::<u32>::new(8);

        let result = topic.publish(7).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn recv_resolves_to_none_once_the_topic_is_gone() {
        let topic = MemoryTopic::<u32>::new(8);
        let mut subscription = topic.subscribe();
        topic.publish(7).await.unwrap();

        drop(topic);

        assert_eq!(subscription.recv().await, Some(7));
        assert_eq!(subscription.recv().await, None);
    }
}
