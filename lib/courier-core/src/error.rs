//! Error types for courier.
//!
//! Failures are split by when they happen:
//! - [`BuildError`]: the request could not be formed; nothing was sent.
//! - [`HttpError`]: anything that went wrong once the request was handed to a
//!   transport, delivered as the failure branch of [`Result`].

use bytes::Bytes;
use derive_more::{Display, Error, From};

use crate::{Headers, ResponseMeta};

// ============================================================================
// Build errors
// ============================================================================

/// The request could not be built.
#[derive(Debug, Display, Error, From)]
pub enum BuildError {
    /// Neither `url` nor `base_url + path` produced a valid URL.
    #[display("invalid URL: {_0:?}")]
    #[from(skip)]
    InvalidUrl(#[error(not(source))] String),

    /// The endpoint could not be serialized into a JSON body.
    #[display("failed to encode request body: {_0}")]
    #[from]
    EncodingFailed(serde_json::Error),
}

// ============================================================================
// Decode errors
// ============================================================================

/// A response body could not be turned into the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    Json {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// A raw result format was used with a response type other than `Raw`.
    #[display("raw result format requires a `Raw` response type, not `{expected}`")]
    RawTypeMismatch {
        /// The declared response type.
        #[error(not(source))]
        expected: &'static str,
    },
}

impl DecodeError {
    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Json {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Transport errors
// ============================================================================

/// Failure reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// The exchange exceeded the request timeout.
    #[display("request timeout")]
    Timeout,

    /// The transport refused the request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// Reading the response body failed.
    #[display("body error: {_0}")]
    Body(#[error(not(source))] String),

    /// Anything else.
    #[display("{_0}")]
    Other(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

// ============================================================================
// HTTP errors
// ============================================================================

/// Every way a submitted request can fail.
///
/// Equality is approximate, see the [`PartialEq`] impl.
#[derive(Debug, Display, Error)]
pub enum HttpError {
    /// The transport produced no response at all.
    #[display("no response")]
    NoResponse,

    /// The transport produced a response that is not HTTP-shaped.
    #[display("unexpected response")]
    UnexpectedResponse {
        /// What the transport received.
        #[error(not(source))]
        response: ResponseMeta,
        /// Body bytes, if any.
        #[error(not(source))]
        body: Option<Bytes>,
    },

    /// An HTTP response whose status is not 2xx.
    #[display("unsuccessful response: HTTP {status}")]
    UnsuccessfulResponse {
        /// HTTP status code.
        #[error(not(source))]
        status: u16,
        /// Response headers.
        #[error(not(source))]
        headers: Headers,
        /// Body bytes, if any.
        #[error(not(source))]
        body: Option<Bytes>,
    },

    /// The body could not be decoded into the expected type.
    #[display("unable to deserialize response: {error}")]
    UnableToDeserialize {
        /// Why decoding failed.
        #[error(source)]
        error: DecodeError,
        /// Body bytes, if any.
        #[error(not(source))]
        body: Option<Bytes>,
    },

    /// The transport failed.
    #[display("{error}")]
    Other {
        /// The transport failure.
        #[error(source)]
        error: TransportError,
        /// Body bytes, if any.
        #[error(not(source))]
        body: Option<Bytes>,
    },
}

/// Result of a submitted request.
pub type Result<T> = std::result::Result<T, HttpError>;

impl HttpError {
    /// Create an unsuccessful response error.
    #[must_use]
    pub fn unsuccessful(status: u16, body: Option<Bytes>) -> Self {
        Self::UnsuccessfulResponse {
            status,
            headers: Headers::new(),
            body,
        }
    }

    /// Returns the HTTP status code if this is an unsuccessful response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// The raw body attached to this error, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::NoResponse => None,
            Self::UnexpectedResponse { body, .. }
            | Self::UnsuccessfulResponse { body, .. }
            | Self::UnableToDeserialize { body, .. }
            | Self::Other { body, .. } => body.as_ref(),
        }
    }

    /// Try to decode the attached body as JSON.
    ///
    /// Returns `None` when no body is attached.
    ///
    /// ```ignore
    /// if let Some(Ok(api_error)) = error.decode_body::<ApiError>() {
    ///     println!("{}", api_error.message);
    /// }
    /// ```
    pub fn decode_body<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Option<std::result::Result<T, DecodeError>> {
        self.body().map(|body| crate::from_json(body))
    }
}

/// Approximate equality.
///
/// - unsuccessful responses compare status code and body
/// - unexpected responses compare the response metadata and body
/// - deserialization and transport failures compare only the attached body;
///   the wrapped error is ignored
impl PartialEq for HttpError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoResponse, Self::NoResponse) => true,
            (
                Self::UnexpectedResponse {
                    response: left,
                    body: left_body,
                },
                Self::UnexpectedResponse {
                    response: right,
                    body: right_body,
                },
            ) => left == right && left_body == right_body,
            (
                Self::UnsuccessfulResponse {
                    status: left,
                    body: left_body,
                    ..
                },
                Self::UnsuccessfulResponse {
                    status: right,
                    body: right_body,
                    ..
                },
            ) => left == right && left_body == right_body,
            (
                Self::UnableToDeserialize {
                    body: left_body, ..
                },
                Self::UnableToDeserialize {
                    body: right_body, ..
                },
            )
            | (
                Self::Other {
                    body: left_body, ..
                },
                Self::Other {
                    body: right_body, ..
                },
            ) => left_body == right_body,
            _ => false,
        }
    }
}
