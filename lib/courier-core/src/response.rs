//! Response descriptors.
//!
//! A transport reports what came back as a [`UrlResponse`]: either an
//! HTTP-shaped [`HttpResponse`] or some other [`ResponseMeta`] (for
//! transports that can talk non-HTTP schemes). Bodies travel separately.

use crate::{Headers, StatusClass};

/// Status line and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    url: Option<url::Url>,
    status: u16,
    headers: Headers,
}

impl HttpResponse {
    /// Creates a new response descriptor.
    #[must_use]
    pub fn new(status: u16, headers: Headers) -> Self {
        Self {
            url: None,
            status,
            headers,
        }
    }

    /// Attaches the URL the response was received from.
    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.url = Some(url);
        self
    }

    /// URL the response was received from, when known.
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.url.as_ref()
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Class of the status code.
    #[must_use]
    pub const fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Status is 1xx.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        matches!(self.status_class(), StatusClass::Informational)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status_class(), StatusClass::Success)
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        matches!(self.status_class(), StatusClass::Redirection)
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_class(), StatusClass::ClientError)
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status_class(), StatusClass::ServerError)
    }
}

/// Metadata of a response that is not HTTP-shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// URL the response was received from.
    pub url: Option<url::Url>,
    /// MIME type announced by the source.
    pub mime_type: Option<String>,
    /// Expected content length, when announced.
    pub expected_content_length: Option<u64>,
}

/// What a transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResponse {
    /// An HTTP response.
    Http(HttpResponse),
    /// Anything else.
    Other(ResponseMeta),
}

impl UrlResponse {
    /// The HTTP response, if this is one.
    #[must_use]
    pub fn as_http(&self) -> Option<&HttpResponse> {
        match self {
            Self::Http(response) => Some(response),
            Self::Other(_) => None,
        }
    }
}

impl From<HttpResponse> for UrlResponse {
    fn from(response: HttpResponse) -> Self {
        Self::Http(response)
    }
}

impl From<ResponseMeta> for UrlResponse {
    fn from(meta: ResponseMeta) -> Self {
        Self::Other(meta)
    }
}
