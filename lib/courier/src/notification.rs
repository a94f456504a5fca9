//! Side-channel broadcast of unsuccessful responses.
//!
//! Endpoints that opt in through
//! [`NotificationPublishable`](crate::NotificationPublishable) have their
//! non-2xx responses published on the session's [`NotificationCenter`].
//! Publishing never affects the result delivered to the caller.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use crate::HttpResponse;

/// Topic of notifications published for non-2xx responses.
pub const RECEIVED_NON_2XX: &str = "courier.received-non-2xx";

/// Default number of notifications buffered per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// A published notification.
#[derive(Clone)]
pub struct Notification {
    topic: &'static str,
    endpoint: Arc<dyn Any + Send + Sync>,
    endpoint_type: &'static str,
    response: HttpResponse,
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("topic", &self.topic)
            .field("endpoint_type", &self.endpoint_type)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

impl Notification {
    /// A [`RECEIVED_NON_2XX`] notification for `endpoint`.
    #[must_use]
    pub fn received_non_2xx<E: Any + Send + Sync>(
        endpoint: Arc<E>,
        response: HttpResponse,
    ) -> Self {
        Self {
            topic: RECEIVED_NON_2XX,
            endpoint,
            endpoint_type: std::any::type_name::<E>(),
            response,
        }
    }

    /// The notification topic.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        self.topic
    }

    /// Type name of the endpoint that produced the response.
    #[must_use]
    pub const fn endpoint_type(&self) -> &'static str {
        self.endpoint_type
    }

    /// The endpoint, if it is an `E`.
    #[must_use]
    pub fn endpoint<E: Any + Send + Sync>(&self) -> Option<&E> {
        self.endpoint.downcast_ref()
    }

    /// The response that triggered the notification.
    #[must_use]
    pub const fn response(&self) -> &HttpResponse {
        &self.response
    }
}

/// Broadcast bus for [`Notification`]s.
///
/// Cloning shares the same bus. Subscribers that fall behind by more than the
/// capacity miss the oldest notifications.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    sender: broadcast::Sender<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    /// A bus buffering up to `capacity` notifications per subscriber.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every notification published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Publish without waiting. Returns how many subscribers were reached.
    pub fn publish(&self, notification: Notification) -> usize {
        let topic = notification.topic;
        let reached = self.sender.send(notification).unwrap_or(0);
        debug!(topic, reached, "notification published");
        reached
    }
}
