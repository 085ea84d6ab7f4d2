use crate::domain::event::TransactionCompleted;
use crate::domain::ports::EventPublisher;
use crate::error::{Result, TransferError};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;

/// Emits each event as a JSON payload through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &TransactionCompleted) -> Result<()> {
        let payload = serde_json::to_string(event)
            .map_err(|e| TransferError::PublishFailed(e.to_string()))?;
        let [sender_channel, receiver_channel] = event.channels();
        info!(
            target: "peerpay::events",
            event = TransactionCompleted::NAME,
            %sender_channel,
            %receiver_channel,
            %payload,
            "event published"
        );
        Ok(())
    }
}

/// Fans events out to in-process subscribers.
///
/// Subscribers that fall more than `capacity` events behind lose the oldest
/// ones; publishing with nobody subscribed is reported as a failure.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<TransactionCompleted>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransactionCompleted> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastPublisher {
    async fn publish(&self, event: &TransactionCompleted) -> Result<()> {
        self.sender
            .send(event.clone())
            .map(|_| ())
            .map_err(|_| TransferError::PublishFailed("no active subscribers".to_string()))
    }
}
