//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits and the derive
//! macro for easy glob importing:
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    AnyEndpoint, Authenticating, BuildError, CachePolicy, DateStrategy, Dispatch, Endpoint,
    Headers, HttpError, HttpResponse, HyperClient, Interceptable, Method, NotificationPublishable,
    OptionalResponse, Raw, Request, Result, ResultFormat, Session, Timestamp,
};
pub use serde::{Deserialize, Serialize};
pub use std::borrow::Cow;
