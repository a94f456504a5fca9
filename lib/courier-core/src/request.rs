//! Built HTTP requests.
//!
//! A [`Request`] is the fully formed wire request produced from an endpoint:
//! it is built once, adjusted by the header/sign/intercept stages and then
//! handed to a transport.
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use std::time::Duration;

use bytes::Bytes;

use crate::{Headers, Method};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How a transport should treat cached responses.
///
/// courier never caches; the policy is carried to the transport untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Follow the caching rules of the protocol.
    #[default]
    UseProtocol,
    /// Always go to the origin.
    ReloadIgnoringCache,
    /// Use cached data when available, whatever its age.
    PreferCache,
    /// Only use cached data, never load.
    CacheOnly,
}

/// An HTTP request with method, URL, headers, optional body and transport hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: Headers,
    body: Option<Bytes>,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Sets a header, returning the modified request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Cache policy hint for the transport.
    #[must_use]
    pub const fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    /// Timeout for the whole exchange.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, Headers, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: url::Url,
    headers: Headers,
    body: Option<Bytes>,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            cache_policy: CachePolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body when one is given.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    /// Sets the cache policy.
    #[must_use]
    pub const fn cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            cache_policy: self.cache_policy,
            timeout: self.timeout,
        }
    }
}
