//! Sessions: the transport, notification bus and primary queue shared by
//! submissions.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

use crate::dispatch::PrimaryQueue;
use crate::notification::{DEFAULT_CAPACITY, NotificationCenter};
use crate::transport::Transport;
use crate::HyperClient;

/// Everything a submission needs besides the endpoint.
///
/// Cloning is cheap and shares the transport, bus and queue.
///
/// ```ignore
/// use courier::Session;
///
/// let session = Session::builder()
///     .notification_capacity(16)
///     .build();
/// let mut non_2xx = session.notifications().subscribe();
/// ```
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn Transport>,
    notifications: NotificationCenter,
    primary: PrimaryQueue,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("notifications", &self.notifications)
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session using [`HyperClient`] with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A session using `transport`.
    #[must_use]
    pub fn with_transport(transport: impl Transport) -> Self {
        Self::builder().transport(transport).build()
    }

    /// Create a new session builder.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// The transport requests are handed to.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// The non-2xx notification bus.
    #[must_use]
    pub const fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The queue [`Dispatch::Primary`](crate::Dispatch::Primary) callbacks run on.
    #[must_use]
    pub const fn primary(&self) -> &PrimaryQueue {
        &self.primary
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    transport: Option<Arc<dyn Transport>>,
    notification_capacity: usize,
    primary: Option<PrimaryQueue>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            notification_capacity: DEFAULT_CAPACITY,
            primary: None,
        }
    }
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("custom_transport", &self.transport.is_some())
            .field("notification_capacity", &self.notification_capacity)
            .field("primary", &self.primary)
            .finish()
    }
}

impl SessionBuilder {
    /// Use `transport` instead of a default [`HyperClient`].
    #[must_use]
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an already shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Notifications buffered per subscriber (default 64).
    #[must_use]
    pub const fn notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// Deliver primary callbacks on `queue`, e.g. one from
    /// [`PrimaryQueue::channel`].
    #[must_use]
    pub fn primary_queue(mut self, queue: PrimaryQueue) -> Self {
        self.primary = Some(queue);
        self
    }

    /// Build the session.
    #[must_use]
    pub fn build(self) -> Session {
        Session {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HyperClient::new())),
            notifications: NotificationCenter::new(self.notification_capacity),
            primary: self.primary.unwrap_or_default(),
        }
    }
}

/// Handle to a callback-style submission.
///
/// Dropping the handle lets the submission run to completion.
#[derive(Debug)]
pub struct SubmitHandle {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl SubmitHandle {
    pub(crate) fn new(task: JoinHandle<()>, cancelled: Arc<AtomicBool>) -> Self {
        Self { task, cancelled }
    }

    /// Stop the submission. The completion callback will not run, unless it
    /// is already running.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.task.abort();
    }

    /// Whether the result has been handed off (or the task was cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
