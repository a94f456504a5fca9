//! Request/response logging middleware.
//!
//! This middleware logs exchanges using the `tracing` crate.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::Request;
use crate::transport::Exchange;

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use courier::HyperClient;
/// use courier::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and the resulting exchange.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Exchange, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Exchange;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Exchange, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            method = %method,
                            url = %url,
                            headers = ?request.headers(),
                            body_len = request.body().map_or(0, |body| body.len()),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(method = %method, url = %url, "sending request");
                    }
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                if let Ok(exchange) = &result {
                    match (&exchange.error, exchange.status()) {
                        (Some(error), _) => warn!(%error, elapsed_ms, "request failed"),
                        (None, Some(status)) if (200..300).contains(&status) => {
                            info!(status, elapsed_ms, "request completed");
                        }
                        (None, Some(status)) => {
                            warn!(status, elapsed_ms, "request failed with HTTP error");
                        }
                        (None, None) => warn!(elapsed_ms, "request completed without HTTP response"),
                    }
                    if matches!(level, LogLevel::Debug) {
                        debug!(
                            body_len = exchange.body.as_ref().map_or(0, |body| body.len()),
                            "response body"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
