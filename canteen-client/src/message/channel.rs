//! Push channel - process-wide fan-out of real-time events
//!
//! ```text
//!   TCP feed ──▶ PushChannel::publish ──┬──▶ Subscription (customers view)
//!                                       ├──▶ Subscription (orders view)
//!                                       └──▶ ...
//! ```
//!
//! Every view takes its own `Subscription` and releases it when torn down.
//! Releasing removes exactly that subscriber; the others keep receiving.
//! Delivery is at-most-once: nothing is acknowledged, buffered for late
//! subscribers, or replayed.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shared::message::{EventName, PushMessage};

use super::MessageError;
use super::transport::{TcpTransport, Transport};

#[derive(Debug)]
struct Subscriber {
    events: Vec<EventName>,
    tx: mpsc::UnboundedSender<PushMessage>,
}

#[derive(Debug, Default)]
struct ChannelInner {
    next_id: AtomicU64,
    subscribers: DashMap<u64, Subscriber>,
}

impl ChannelInner {
    fn remove(&self, id: u64) -> bool {
        self.subscribers.remove(&id).is_some()
    }
}

/// Shared handle on the real-time event channel
#[derive(Debug, Clone, Default)]
pub struct PushChannel {
    inner: Arc<ChannelInner>,
}

impl PushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to a TCP event feed and publish everything it delivers
    ///
    /// The feed ends on the first read error; there is no reconnect.
    pub async fn connect(addr: &str) -> Result<(Self, JoinHandle<()>), MessageError> {
        let transport = TcpTransport::connect(addr).await?;
        info!(%addr, "Connected to event feed");
        let channel = Self::new();
        let feed = channel.spawn_feed(transport);
        Ok((channel, feed))
    }

    /// Publish every message read from `transport` until it fails
    pub fn spawn_feed<T: Transport + 'static>(&self, transport: T) -> JoinHandle<()> {
        let channel = self.clone();
        tokio::spawn(async move {
            loop {
                match transport.read_message().await {
                    Ok(msg) => {
                        channel.publish(msg);
                    }
                    Err(e) => {
                        warn!(error = %e, "Event feed closed");
                        break;
                    }
                }
            }
        })
    }

    /// Register a subscriber for the given events
    pub fn subscribe(&self, events: &[EventName]) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.insert(
            id,
            Subscriber {
                events: events.to_vec(),
                tx,
            },
        );
        debug!(id, ?events, "Subscribed");

        Subscription {
            id,
            rx,
            channel: Arc::clone(&self.inner),
        }
    }

    /// Deliver a message to every interested subscriber
    ///
    /// Returns the number of subscribers it was handed to.
    pub fn publish(&self, msg: PushMessage) -> usize {
        let Some(name) = msg.event_name() else {
            debug!(event = %msg.event, "Ignoring unknown event");
            return 0;
        };

        let mut delivered = 0;
        for entry in self.inner.subscribers.iter() {
            if entry.events.contains(&name) && entry.tx.send(msg.clone()).is_ok() {
                delivered += 1;
            }
        }
        debug!(event = %name, request_id = %msg.request_id, delivered, "Published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }
}

/// One subscriber's view of the channel
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<PushMessage>,
    channel: Arc<ChannelInner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next delivered message, `None` once unsubscribed and drained
    pub async fn recv(&mut self) -> Option<PushMessage> {
        self.rx.recv().await
    }

    /// Handle that can unsubscribe this subscription from elsewhere
    pub fn detacher(&self) -> Detacher {
        Detacher {
            id: self.id,
            channel: Arc::clone(&self.channel),
        }
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.channel.remove(self.id) {
            debug!(id = self.id, "Unsubscribed");
        }
    }
}

/// Synchronous unsubscribe handle for a `Subscription` owned by another task
#[derive(Debug, Clone)]
pub struct Detacher {
    id: u64,
    channel: Arc<ChannelInner>,
}

impl Detacher {
    /// Remove the subscriber; returns false if it was already gone
    pub fn unsubscribe(&self) -> bool {
        let removed = self.channel.remove(self.id);
        if removed {
            debug!(id = self.id, "Unsubscribed");
        }
        removed
    }
}
