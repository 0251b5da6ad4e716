//! Payment notification reconciler
//!
//! Turns `transaction_completed` / `transaction_failed` push events into
//! operator alerts for the view it is attached to, and optionally asks that
//! view to refresh its list. Notifications are advisory: nothing here retries,
//! deduplicates, or touches an order. The query API stays authoritative.

use std::sync::Arc;

use async_trait::async_trait;
use shared::message::{EventName, PushMessage, TransactionEvent};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ClientResult;
use crate::feedback::OperatorFeedback;
use crate::message::{Detacher, PushChannel, Subscription};

/// Reload hook for the view that owns the reconciler
#[async_trait]
pub trait ListRefresher: Send + Sync {
    async fn refresh(&self) -> ClientResult<()>;
}

pub struct NotificationReconciler {
    subscription: Subscription,
    feedback: Arc<dyn OperatorFeedback>,
    refresher: Option<Arc<dyn ListRefresher>>,
    cancel: CancellationToken,
}

impl NotificationReconciler {
    /// Events the reconciler listens to
    pub const EVENTS: [EventName; 2] = [EventName::TransactionCompleted, EventName::TransactionFailed];

    /// Subscribe to the transaction events on `channel`
    pub fn attach(
        channel: &PushChannel,
        feedback: Arc<dyn OperatorFeedback>,
        refresher: Option<Arc<dyn ListRefresher>>,
    ) -> Self {
        let subscription = channel.subscribe(&Self::EVENTS);
        tracing::debug!(subscription = subscription.id(), "Reconciler attached");
        Self {
            subscription,
            feedback,
            refresher,
            cancel: CancellationToken::new(),
        }
    }

    /// Decode and handle one delivered message
    ///
    /// Undecodable payloads are logged and dropped.
    pub async fn handle_message(&self, msg: &PushMessage) {
        match TransactionEvent::from_message(msg) {
            Ok(Some(event)) => self.handle(&event).await,
            Ok(None) => {
                tracing::debug!(event = %msg.event, "Ignoring non-transaction event");
            }
            Err(e) => {
                tracing::warn!(
                    event = %msg.event,
                    request_id = %msg.request_id,
                    "Dropping undecodable notification: {}",
                    e
                );
            }
        }
    }

    /// Alert the operator, then refresh the owning list (best effort)
    pub async fn handle(&self, event: &TransactionEvent) {
        if self.cancel.is_cancelled() {
            return;
        }

        let text = event.to_string();
        tracing::info!(event = %event.event_name(), "{}", text);
        self.feedback.alert(&text);

        if let Some(refresher) = &self.refresher
            && let Err(e) = refresher.refresh().await
        {
            tracing::warn!("List refresh after {} failed: {}", event.event_name(), e);
        }
    }

    /// Wait for and handle the next message
    ///
    /// Returns false once the subscription is closed or the reconciler is
    /// cancelled.
    pub async fn next(&mut self) -> bool {
        let msg = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            msg = self.subscription.recv() => msg,
        };
        match msg {
            Some(msg) if !self.cancel.is_cancelled() => {
                self.handle_message(&msg).await;
                true
            }
            _ => false,
        }
    }

    /// Run the loop on its own task
    pub fn spawn(mut self) -> ReconcilerHandle {
        let token = self.cancel.clone();
        let detacher = self.subscription.detacher();
        let task = tokio::spawn(async move {
            while self.next().await {}
            tracing::debug!("Reconciler stopped");
        });
        ReconcilerHandle {
            token,
            detacher,
            task: Some(task),
        }
    }
}

/// Owner of a running reconciler
///
/// Detaching (or dropping) unsubscribes before returning, so events published
/// afterwards never reach this view.
pub struct ReconcilerHandle {
    token: CancellationToken,
    detacher: Detacher,
    task: Option<JoinHandle<()>>,
}

impl ReconcilerHandle {
    pub fn detach(mut self) {
        self.stop();
    }

    pub fn is_detached(&self) -> bool {
        self.token.is_cancelled()
    }

    fn stop(&mut self) {
        self.token.cancel();
        self.detacher.unsubscribe();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ReconcilerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Toast;
    use shared::message::{TransactionCompletedPayload, TransactionFailedPayload};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Alerts(Mutex<Vec<String>>);

    impl OperatorFeedback for Alerts {
        fn toast(&self, _toast: &Toast) {}

        fn alert(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct CountingRefresher {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ListRefresher for CountingRefresher {
        async fn refresh(&self) -> ClientResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(crate::ClientError::Server("down".into()))
            } else {
                Ok(())
            }
        }
    }

    fn completed(user: &str, amount: f64) -> PushMessage {
        PushMessage::transaction_completed(&TransactionCompletedPayload {
            user: user.to_string(),
            amount,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_alerts_and_refreshes() {
        let channel = PushChannel::new();
        let alerts = Arc::new(Alerts::default());
        let refresher = Arc::new(CountingRefresher::default());
        let mut reconciler =
            NotificationReconciler::attach(&channel, alerts.clone(), Some(refresher.clone()));

        let failed = PushMessage::transaction_failed(&TransactionFailedPayload {
            order_id: "ORD2024001".into(),
            status: "declined".into(),
        })
        .unwrap();
        channel.publish(completed("Asha", 250.0));
        channel.publish(failed);
        assert!(reconciler.next().await);
        assert!(reconciler.next().await);

        assert_eq!(
            *alerts.0.lock().unwrap(),
            vec![
                "Transaction completed by Asha for ₹250".to_string(),
                "Transaction failed for order ORD2024001: declined".to_string(),
            ]
        );
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_still_alerts() {
        let channel = PushChannel::new();
        let alerts = Arc::new(Alerts::default());
        let refresher = Arc::new(CountingRefresher {
            fail: true,
            ..Default::default()
        });
        let mut reconciler =
            NotificationReconciler::attach(&channel, alerts.clone(), Some(refresher.clone()));

        channel.publish(completed("Ravi", 40.0));
        assert!(reconciler.next().await);
        assert_eq!(alerts.0.lock().unwrap().len(), 1);
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_payload_dropped() {
        let channel = PushChannel::new();
        let alerts = Arc::new(Alerts::default());
        let mut reconciler = NotificationReconciler::attach(&channel, alerts.clone(), None);

        channel.publish(PushMessage::new("transaction_completed", b"not json".to_vec()));
        assert!(reconciler.next().await);
        assert!(alerts.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detach_stops_side_effects() {
        let channel = PushChannel::new();
        let alerts = Arc::new(Alerts::default());
        let handle = NotificationReconciler::attach(&channel, alerts.clone(), None).spawn();
        let mut other = channel.subscribe(&[EventName::TransactionCompleted]);
        assert_eq!(channel.subscriber_count(), 2);

        handle.detach();

        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(channel.publish(completed("Asha", 10.0)), 1);
        assert!(other.recv().await.is_some());
        tokio::task::yield_now().await;
        assert!(alerts.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawned_reconciler_delivers() {
        let channel = PushChannel::new();
        let alerts = Arc::new(Alerts::default());
        let handle = NotificationReconciler::attach(&channel, alerts.clone(), None).spawn();

        channel.publish(completed("Meera", 99.5));
        for _ in 0..50 {
            if !alerts.0.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert_eq!(
            *alerts.0.lock().unwrap(),
            vec!["Transaction completed by Meera for ₹99.5".to_string()]
        );
        assert!(!handle.is_detached());
        drop(handle);
        assert_eq!(channel.subscriber_count(), 0);
    }
}
