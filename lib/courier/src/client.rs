//! HTTP transport implementation using hyper-util.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::middleware::LoggingLayer;
use crate::transport::{Exchange, Transport, TransportFuture};
use crate::{
    CachePolicy, Headers, HttpResponse, Request, TransportError,
    config::{ClientConfig, ClientConfigBuilder},
};

// ============================================================================
// Type-Erased Service for Middleware Composition
// ============================================================================

/// Type-erased transport service for middleware composition.
///
/// Failures travel inside the [`Exchange`], so the service itself never errors.
pub type BoxedService = BoxCloneService<Request, Exchange, Infallible>;

/// Future type for Tower Service implementation.
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<Exchange, Infallible>> + Send + 'static>>;

/// Thread-safe wrapper for `BoxedService`.
///
/// `BoxCloneService` is `Send` but not `Sync`; the mutex is only held while
/// cloning the service for a call.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

/// Create an HTTPS connector with rustls and the Mozilla root certificates.
fn https_connector(connect_timeout: Duration) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

// ============================================================================
// Raw Client (internal, used for direct hyper access)
// ============================================================================

/// Raw HTTP client using hyper-util (internal implementation).
#[derive(Clone)]
struct RawHyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl RawHyperClient {
    fn new(config: ClientConfig) -> Self {
        let inner =
            Client::builder(TokioExecutor::new()).build(https_connector(config.connect_timeout));

        Self { inner, config }
    }

    /// Build a hyper request from a courier request.
    fn build_hyper_request(
        &self,
        request: Request,
    ) -> Result<(http::Request<Full<Bytes>>, Duration), TransportError> {
        let timeout = self.config.effective_timeout(request.timeout());
        let cache_policy = request.cache_policy();
        let (method, url, headers, body) = request.into_parts();
        if let Some(name) = headers.rejected() {
            return Err(TransportError::invalid_request(format!(
                "invalid header `{name}`"
            )));
        }

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        if let Some(map) = builder.headers_mut() {
            map.extend(headers.as_header_map().clone());
        }
        if !headers.contains("User-Agent") {
            builder = builder.header(http::header::USER_AGENT, self.config.user_agent.as_str());
        }
        if cache_policy == CachePolicy::ReloadIgnoringCache && !headers.contains("Cache-Control") {
            builder = builder.header(http::header::CACHE_CONTROL, "no-cache");
        }

        let body = body.map_or_else(Full::default, Full::new);
        let http_request = builder
            .body(body)
            .map_err(|e| TransportError::invalid_request(e.to_string()))?;

        Ok((http_request, timeout))
    }

    async fn execute(&self, request: Request) -> Exchange {
        let url = request.url().clone();
        let (hyper_request, timeout) = match self.build_hyper_request(request) {
            Ok(parts) => parts,
            Err(error) => return Exchange::failed(error),
        };

        let response = match tokio::time::timeout(timeout, self.inner.request(hyper_request)).await
        {
            Err(_) => return Exchange::failed(TransportError::Timeout),
            Ok(Err(error)) => return Exchange::failed(Self::map_hyper_error(error)),
            Ok(Ok(response)) => response,
        };

        let status = response.status().as_u16();
        let response_headers = Headers::from(response.headers().clone());
        let descriptor = HttpResponse::new(status, response_headers).with_url(url);

        match response.into_body().collect().await {
            Ok(collected) => Exchange::http(descriptor, collected.to_bytes()),
            Err(e) => Exchange::failed(TransportError::Body(e.to_string())).with_response(descriptor),
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> TransportError {
        let msg = err.to_string();

        if err.is_connect() {
            return TransportError::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return TransportError::tls(msg);
        }

        TransportError::connection(msg)
    }
}

impl Service<Request> for RawHyperClient {
    type Response = Exchange;
    type Error = Infallible;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { Ok(client.execute(request).await) })
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// Default [`Transport`]: hyper-util with rustls, HTTP/1.1 and HTTP/2.
///
/// # Example
///
/// ```ignore
/// use courier::{HyperClient, Session};
///
/// let client = HyperClient::builder()
///     .user_agent("my-app/1.0")
///     .with_logging()
///     .build();
/// let session = Session::builder().transport(client).build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SyncService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let raw = RawHyperClient::new(config.clone());
        Self {
            service: SyncService::new(BoxCloneService::new(raw)),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperClient {
    fn send(&self, request: Request) -> TransportFuture {
        let call = self.service.call(request);
        Box::pin(async move {
            match call.await {
                Ok(exchange) => exchange,
                Err(never) => match never {},
            }
        })
    }
}

impl Service<Request> for HyperClient {
    type Response = Exchange;
    type Error = Infallible;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HyperClient`].
///
/// ```ignore
/// use courier::HyperClient;
/// use courier::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the timeout used for requests that carry a zero timeout.
    #[must_use]
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.default_timeout(timeout);
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Add a Tower layer around the transport.
    ///
    /// Layers are applied in order: first added = innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = Exchange, Error = Infallible> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Add request/response logging at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add request/response logging at debug level (includes headers).
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client with all configured middleware.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let mut service: BoxedService = BoxCloneService::new(RawHyperClient::new(config.clone()));

        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperClient {
            service: SyncService::new(service),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    fn client() -> RawHyperClient {
        RawHyperClient::new(ClientConfig::default())
    }

    #[test]
    fn client_builder() {
        let client = HyperClient::builder()
            .connect_timeout(Duration::from_secs(3))
            .user_agent("test-agent")
            .with_logging()
            .build();

        assert_eq!(client.config().connect_timeout, Duration::from_secs(3));
        assert_eq!(client.config().user_agent, "test-agent");
        assert!(format!("{client:?}").contains("HyperClient"));
    }

    #[test]
    fn hyper_request_carries_headers_and_body() {
        let request = Request::builder(Method::Post, "https://example.com/x".parse().expect("url"))
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .timeout(Duration::from_secs(5))
            .build();

        let (hyper_request, timeout) = client().build_hyper_request(request).expect("valid");
        assert_eq!(timeout, Duration::from_secs(5));
        assert_eq!(hyper_request.method(), http::Method::POST);
        assert_eq!(
            hyper_request.headers()["content-type"],
            "application/json"
        );
        assert!(
            hyper_request.headers()[http::header::USER_AGENT]
                .to_str()
                .expect("ascii")
                .starts_with("courier/")
        );
        assert!(!hyper_request.headers().contains_key(http::header::CACHE_CONTROL));
    }

    #[test]
    fn reload_ignoring_cache_sets_no_cache() {
        let request = Request::builder(Method::Get, "https://example.com".parse().expect("url"))
            .cache_policy(CachePolicy::ReloadIgnoringCache)
            .timeout(Duration::ZERO)
            .build();

        let (hyper_request, timeout) = client().build_hyper_request(request).expect("valid");
        assert_eq!(timeout, Duration::from_secs(60));
        assert_eq!(hyper_request.headers()[http::header::CACHE_CONTROL], "no-cache");
    }

    #[test]
    fn explicit_user_agent_wins() {
        let request = Request::builder(Method::Get, "https://example.com".parse().expect("url"))
            .header("user-agent", "custom/2")
            .build();

        let (hyper_request, _) = client().build_hyper_request(request).expect("valid");
        let agents: Vec<_> = hyper_request
            .headers()
            .get_all(http::header::USER_AGENT)
            .iter()
            .map(|value| value.to_str().expect("ascii"))
            .collect();
        assert_eq!(agents, vec!["custom/2"]);
    }

    #[test]
    fn invalid_header_is_an_invalid_request() {
        let request = Request::builder(Method::Get, "https://example.com".parse().expect("url"))
            .header("X-Token", "abc\r\nInjected: yes")
            .build();

        let error = client()
            .build_hyper_request(request)
            .expect_err("header rejected");
        assert_eq!(
            error,
            TransportError::invalid_request("invalid header `X-Token`")
        );
    }
}
