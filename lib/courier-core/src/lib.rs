//! Core types for the courier HTTP endpoint client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Method`], [`Request`] and [`RequestBuilder`]
//! - [`HttpResponse`], [`UrlResponse`] and [`StatusClass`]
//! - [`HttpError`], [`BuildError`] and [`Result`]
//! - [`ResultFormat`], [`Raw`] and [`OptionalResponse`] for decoding bodies
//! - [`DateStrategy`] and [`Timestamp`] for dates inside JSON payloads

mod body;
mod date;
mod error;
mod format;
mod headers;
mod method;
mod optional;
pub mod prelude;
mod request;
mod response;
mod status;

pub use body::{ContentType, from_json, from_json_with, to_json, to_json_with};
pub use date::{DateStrategy, Timestamp, with_date_strategy};
pub use error::{BuildError, DecodeError, HttpError, Result, TransportError};
pub use format::{Raw, ResultFormat, downcast_raw};
pub use headers::Headers;
pub use method::Method;
pub use optional::OptionalResponse;
pub use request::{CachePolicy, DEFAULT_TIMEOUT, Request, RequestBuilder};
pub use response::{HttpResponse, ResponseMeta, UrlResponse};
pub use status::StatusClass;

pub use bytes::Bytes;
pub use url::Url;
