//! Declarative HTTP endpoints with typed results.
//!
//! Describe an endpoint as a value, send it, get a `Result<T, HttpError>`.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Endpoint)]
//! #[endpoint(method = "GET", base_url = "https://api.example.com", path = "/users/{id}")]
//! #[endpoint(response = User)]
//! pub struct GetUser {
//!     id: u64,
//! }
//!
//! let session = Session::new();
//! let user = GetUser { id: 42 }.send(&session)?.await?;
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod builder;
mod client;
mod config;
pub mod dispatch;
mod endpoint;
mod erased;
pub mod middleware;
pub mod notification;
mod pipeline;
pub mod prelude;
mod session;
pub mod transport;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};
pub use dispatch::{Dispatch, PrimaryLoop, PrimaryQueue};
pub use endpoint::{Authenticating, EncodeBody, Endpoint, Interceptable, NotificationPublishable};
pub use erased::AnyEndpoint;
pub use notification::{Notification, NotificationCenter, RECEIVED_NON_2XX};
pub use pipeline::Pending;
pub use session::{Session, SessionBuilder, SubmitHandle};
pub use transport::{Exchange, Transport};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    BuildError, Bytes, CachePolicy, ContentType, DEFAULT_TIMEOUT, DateStrategy, DecodeError,
    Headers, HttpError, HttpResponse, Method, OptionalResponse, Raw, Request, RequestBuilder,
    ResponseMeta, Result, ResultFormat, StatusClass, Timestamp, TransportError, Url, UrlResponse,
    downcast_raw, from_json, from_json_with, to_json, to_json_with, with_date_strategy,
};

// Re-export macros
pub use courier_macro::Endpoint;
