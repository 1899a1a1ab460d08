//! Order confirmation notifications.
//!
//! Confirmations are handed to an in-process queue and delivered by a
//! background task. Enqueueing never blocks and never fails the caller, so a
//! mail outage cannot undo or delay an order that has already committed.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{error, info, warn};

use crate::domain::orders::records::OrderUuid;

/// A confirmation for one placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order: OrderUuid,
    pub recipient: String,
}

impl OrderConfirmation {
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Order Confirmation - {}", self.order)
    }

    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Thank you for your order {}. We are processing it and will notify you once it's shipped.",
            self.order
        )
    }
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },
}

/// Delivers rendered messages.
#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Writes each message to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        info!(recipient, subject, body, "email sent");

        Ok(())
    }
}

/// Accepts order confirmations for delivery.
#[automock]
pub trait OrderNotifier: Send + Sync {
    /// Queue a confirmation. Failures are logged, never returned.
    fn notify_order_placed(&self, confirmation: OrderConfirmation);
}

/// Queues confirmations for a background delivery task.
#[derive(Clone)]
pub struct QueuedNotifier {
    sender: UnboundedSender<OrderConfirmation>,
}

impl fmt::Debug for QueuedNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedNotifier")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl QueuedNotifier {
    /// Start the delivery task on the current runtime.
    ///
    /// The task ends once every `QueuedNotifier` clone has been dropped and the
    /// queue has drained.
    #[must_use]
    pub fn spawn(mailer: Arc<dyn Mailer>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        let worker = tokio::spawn(deliver(receiver, mailer));

        (Self { sender }, worker)
    }
}

impl OrderNotifier for QueuedNotifier {
    fn notify_order_placed(&self, confirmation: OrderConfirmation) {
        let order = confirmation.order;

        if self.sender.send(confirmation).is_err() {
            warn!(%order, "notification queue closed; confirmation dropped");
        }
    }
}

async fn deliver(mut receiver: UnboundedReceiver<OrderConfirmation>, mailer: Arc<dyn Mailer>) {
    while let Some(confirmation) = receiver.recv().await {
        let result = mailer
            .send(
                &confirmation.recipient,
                &confirmation.subject(),
                &confirmation.body(),
            )
            .await;

        if let Err(err) = result {
            error!(order = %confirmation.order, error = %err, "failed to send order confirmation");
        }
    }
}
