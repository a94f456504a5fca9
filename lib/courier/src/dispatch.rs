//! Where completion callbacks run.
//!
//! A callback either runs on the task that drove the transport
//! ([`Dispatch::Transport`]) or is posted to the session's [`PrimaryQueue`]
//! ([`Dispatch::Primary`]), a single serial context in the spirit of a UI
//! thread: callbacks posted there run one at a time, in posting order.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Delivery context for a completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dispatch {
    /// Post to the session's primary queue.
    #[default]
    Primary,
    /// Run wherever the transport completed.
    Transport,
}

enum Mode {
    /// A dedicated thread, started on first use.
    Thread(OnceLock<Option<mpsc::UnboundedSender<Job>>>),
    /// Jobs are drained by a caller-owned [`PrimaryLoop`].
    External(mpsc::UnboundedSender<Job>),
}

/// Serial execution context for [`Dispatch::Primary`] callbacks.
///
/// Cloning shares the same queue.
#[derive(Clone)]
pub struct PrimaryQueue {
    mode: Arc<Mode>,
}

impl fmt::Debug for PrimaryQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match *self.mode {
            Mode::Thread(_) => "thread",
            Mode::External(_) => "external",
        };
        f.debug_struct("PrimaryQueue").field("mode", &mode).finish()
    }
}

impl Default for PrimaryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimaryQueue {
    /// A queue backed by a dedicated `courier-primary` thread.
    ///
    /// The thread is spawned on the first posted job and lives as long as
    /// any clone of the queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Arc::new(Mode::Thread(OnceLock::new())),
        }
    }

    /// A queue drained by the returned [`PrimaryLoop`].
    ///
    /// Use this when the caller already owns a main loop and wants callbacks
    /// delivered on it.
    #[must_use]
    pub fn channel() -> (Self, PrimaryLoop) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue = Self {
            mode: Arc::new(Mode::External(sender)),
        };
        (queue, PrimaryLoop { receiver })
    }

    /// Post a job. It runs after every job posted before it.
    pub fn post(&self, job: impl FnOnce() + Send + 'static) {
        let sender = match &*self.mode {
            Mode::Thread(cell) => cell.get_or_init(spawn_primary_thread).as_ref(),
            Mode::External(sender) => Some(sender),
        };

        let job: Job = Box::new(job);
        match sender {
            Some(sender) => {
                if sender.send(job).is_err() {
                    warn!("primary queue is closed, dropping callback");
                }
            }
            // No thread could be started; run in place rather than lose it.
            None => run_job(job),
        }
    }
}

/// Run one job. A panicking callback is logged and the queue keeps serving.
fn run_job(job: Job) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
        warn!(panic = panic_message(&*payload), "completion callback panicked");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

fn spawn_primary_thread() -> Option<mpsc::UnboundedSender<Job>> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
    let spawned = std::thread::Builder::new()
        .name("courier-primary".to_string())
        .spawn(move || {
            while let Some(job) = receiver.blocking_recv() {
                run_job(job);
            }
            debug!("primary queue stopped");
        });

    match spawned {
        Ok(_) => Some(sender),
        Err(error) => {
            warn!(%error, "failed to start primary queue thread");
            None
        }
    }
}

/// Receiving side of [`PrimaryQueue::channel`].
pub struct PrimaryLoop {
    receiver: mpsc::UnboundedReceiver<Job>,
}

impl fmt::Debug for PrimaryLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimaryLoop")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

impl PrimaryLoop {
    /// Run jobs until every [`PrimaryQueue`] clone is dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            run_job(job);
        }
    }

    /// Wait for the next job and run it. Returns `false` once the queue is closed.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                run_job(job);
                true
            }
            None => false,
        }
    }

    /// Run every job already queued, without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.receiver.try_recv() {
            run_job(job);
            count += 1;
        }
        count
    }
}
