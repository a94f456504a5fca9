//! # Chapter 3: Sessions & Dispatch
//!
//! What a [`Session`](crate::Session) holds and how callbacks are delivered.
//!
//! ## Transports
//!
//! `Session::new()` uses [`HyperClient`](crate::HyperClient). Configure it, or
//! wrap it in Tower layers:
//!
//! ```ignore
//! let client = HyperClient::builder()
//!     .connect_timeout(Duration::from_secs(5))
//!     .user_agent("my-app/1.0")
//!     .with_logging()
//!     .build();
//!
//! let session = Session::builder().transport(client).build();
//! ```
//!
//! Any [`Transport`](crate::Transport) works, including a closure:
//!
//! ```ignore
//! let session = Session::with_transport(transport::from_fn(|request| async move {
//!     Exchange::http(HttpResponse::new(200, Headers::new()), "{}")
//! }));
//! ```
//!
//! ## Callbacks
//!
//! `submit` delivers the result to a callback instead of a future. By default
//! the callback runs on the session's primary queue, one at a time and in
//! order:
//!
//! ```ignore
//! let handle = GetUser { id: 1 }.submit(&session, |result| match result {
//!     Ok(user) => println!("{user:?}"),
//!     Err(e) => eprintln!("{e}"),
//! })?;
//!
//! // Changed our mind: the callback will not run.
//! handle.cancel();
//! ```
//!
//! Use `submit_on(&session, Dispatch::Transport, ...)` to run the callback on
//! the task that received the response instead.
//!
//! To receive primary callbacks on your own loop:
//!
//! ```ignore
//! let (queue, primary) = PrimaryQueue::channel();
//! let session = Session::builder().primary_queue(queue).build();
//! tokio::spawn(primary.run());
//! ```
//!
//! ## Non-2xx Notifications
//!
//! Endpoints marked `publish` can broadcast unsuccessful responses to anyone
//! listening on the session:
//!
//! ```ignore
//! impl NotificationPublishable for GetUser {
//!     fn should_publish(&self, response: &HttpResponse) -> bool {
//!         response.status() == 401
//!     }
//! }
//!
//! let mut unauthorized = session.notifications().subscribe();
//! tokio::spawn(async move {
//!     while let Ok(notification) = unauthorized.recv().await {
//!         println!("{} got {}", notification.endpoint_type(), notification.response().status());
//!     }
//! });
//! ```
//!
//! The broadcast never changes the result the caller receives, and 2xx
//! responses are never published.
//!
//! ## Heterogeneous Collections
//!
//! Endpoints sharing a response type can be erased:
//!
//! ```ignore
//! let checks: Vec<AnyEndpoint<Raw>> = vec![Health.erase(), Ready.erase()];
//! for check in checks {
//!     check.send(&session)?.await?;
//! }
//! ```
