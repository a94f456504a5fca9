//! The transport seam.
//!
//! A [`Transport`] takes a fully prepared [`Request`] and reports back what
//! happened as an [`Exchange`]: optional body bytes, an optional response
//! descriptor and an optional error. Classifying that triple is the
//! pipeline's job, so transports never fail with a `Result`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;

use crate::{HttpResponse, Request, TransportError, UrlResponse};

/// Future returned by [`Transport::send`].
pub type TransportFuture = Pin<Box<dyn Future<Output = Exchange> + Send + 'static>>;

/// What a transport observed for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchange {
    /// Body bytes, if any were received.
    pub body: Option<Bytes>,
    /// Response descriptor, if any was received.
    pub response: Option<UrlResponse>,
    /// Transport failure, if any.
    pub error: Option<TransportError>,
}

impl Exchange {
    /// An HTTP response with a body.
    #[must_use]
    pub fn http(response: HttpResponse, body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            response: Some(UrlResponse::Http(response)),
            error: None,
        }
    }

    /// A transport failure with nothing received.
    #[must_use]
    pub fn failed(error: TransportError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attach a response descriptor.
    #[must_use]
    pub fn with_response(mut self, response: impl Into<UrlResponse>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Attach body bytes.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a transport failure.
    #[must_use]
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }

    /// HTTP status code, when the response is HTTP-shaped.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response
            .as_ref()
            .and_then(UrlResponse::as_http)
            .map(HttpResponse::status)
    }
}

/// Sends prepared requests.
///
/// Implementations must be cheap to share; a [`Session`](crate::Session)
/// holds one behind an `Arc` and calls it from many tasks.
pub trait Transport: Send + Sync + 'static {
    /// Submit `request` and resolve once the exchange is complete.
    ///
    /// Dropping the returned future cancels the exchange.
    fn send(&self, request: Request) -> TransportFuture;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: Request) -> TransportFuture {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> TransportFuture {
        (**self).send(request)
    }
}

/// Transport backed by a closure. Created with [`from_fn`].
#[derive(Clone)]
pub struct FnTransport<F> {
    f: F,
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

/// Build a [`Transport`] from an async closure.
///
/// ```
/// use courier::transport::{self, Exchange};
/// use courier::{Headers, HttpResponse};
///
/// let transport = transport::from_fn(|_request| async {
///     Exchange::http(HttpResponse::new(200, Headers::new()), "[]")
/// });
/// # let _ = transport;
/// ```
pub fn from_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Exchange> + Send + 'static,
{
    FnTransport { f }
}

impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Exchange> + Send + 'static,
{
    fn send(&self, request: Request) -> TransportFuture {
        Box::pin((self.f)(request))
    }
}
