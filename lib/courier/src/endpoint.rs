//! Endpoint descriptors and their optional capabilities.

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::pipeline::{self, Pending};
use crate::{
    AnyEndpoint, BuildError, CachePolicy, DEFAULT_TIMEOUT, DateStrategy, HttpResponse, Method,
    Request, Result, ResultFormat, Session, SubmitHandle, builder, dispatch::Dispatch,
};

/// Serializes an endpoint into its request body.
///
/// Implemented for every `Serialize` type; endpoints expose it through
/// [`Endpoint::encodable`].
pub trait EncodeBody {
    /// Encode as JSON, writing dates with `strategy`.
    fn encode_body(&self, strategy: &DateStrategy) -> serde_json::Result<Bytes>;
}

impl<T: serde::Serialize> EncodeBody for T {
    fn encode_body(&self, strategy: &DateStrategy) -> serde_json::Result<Bytes> {
        crate::to_json_with(self, strategy)
    }
}

/// Signs a request, typically by adding credentials.
///
/// Runs after the result format headers and before [`Interceptable`].
pub trait Authenticating {
    /// Return the signed request.
    fn sign(&self, request: Request) -> Request;
}

/// Rewrites a request immediately before it is sent.
///
/// Nothing touches the request after the interceptor, so headers set here are
/// the ones sent.
pub trait Interceptable {
    /// Return the request to send.
    fn intercept(&self, request: Request) -> Request;
}

/// Opts an endpoint into the non-2xx notification side channel.
pub trait NotificationPublishable {
    /// Whether an unsuccessful `response` should be broadcast.
    ///
    /// Only consulted for non-2xx responses.
    fn should_publish(&self, response: &HttpResponse) -> bool;
}

/// A declarative description of one HTTP endpoint.
///
/// Only [`Response`](Endpoint::Response) and [`METHOD`](Endpoint::METHOD) are
/// required; everything else has a default. Capabilities are opted into by
/// returning `Some(self)` from the matching accessor.
///
/// ```
/// use std::borrow::Cow;
/// use courier::{Endpoint, Method};
///
/// #[derive(serde::Serialize)]
/// struct CreateNote {
///     text: String,
/// }
///
/// impl Endpoint for CreateNote {
///     type Response = serde_json::Value;
///     const METHOD: Method = Method::Post;
///
///     fn base_url(&self) -> Cow<'_, str> {
///         "https://api.example.com".into()
///     }
///
///     fn path(&self) -> Cow<'_, str> {
///         "/notes".into()
///     }
///
///     fn encodable(&self) -> Option<&dyn courier::EncodeBody> {
///         Some(self)
///     }
/// }
///
/// let request = CreateNote { text: "hi".into() }.request().unwrap();
/// assert_eq!(request.url().as_str(), "https://api.example.com/notes");
/// assert_eq!(request.body().unwrap().as_ref(), br#"{"text":"hi"}"#);
/// ```
pub trait Endpoint: Send + Sync + 'static {
    /// The decoded response type. Use [`Raw`](crate::Raw) for undecoded bytes.
    type Response: DeserializeOwned + Send + 'static;

    /// The HTTP method.
    const METHOD: Method;

    /// Base URL, joined with [`path`](Endpoint::path).
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    /// Path appended to [`base_url`](Endpoint::base_url).
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    /// Absolute URL. When present it is used instead of `base_url + path`.
    fn url(&self) -> Option<Url> {
        None
    }

    /// Cache policy carried by the request.
    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::default()
    }

    /// Request timeout.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// How the response body is decoded.
    fn result_format(&self) -> ResultFormat {
        ResultFormat::default()
    }

    /// Date representation used when encoding the body.
    fn date_encoding_strategy(&self) -> DateStrategy {
        DateStrategy::default()
    }

    /// Date representation used when decoding the response.
    fn date_decoding_strategy(&self) -> DateStrategy {
        DateStrategy::default()
    }

    /// Body bytes prepared by the caller. Takes precedence over
    /// [`encodable`](Endpoint::encodable).
    fn pre_encoded(&self) -> Option<Bytes> {
        None
    }

    /// Encoder producing the JSON body.
    fn encodable(&self) -> Option<&dyn EncodeBody> {
        None
    }

    /// Request signer.
    fn signer(&self) -> Option<&dyn Authenticating> {
        None
    }

    /// Last-chance request rewrite.
    fn interceptor(&self) -> Option<&dyn Interceptable> {
        None
    }

    /// Non-2xx notification policy.
    fn publisher(&self) -> Option<&dyn NotificationPublishable> {
        None
    }

    /// Build the request: URL, method, cache policy, timeout and body.
    ///
    /// Result format headers, signing and interception are applied later, at
    /// submission.
    fn request(&self) -> std::result::Result<Request, BuildError>
    where
        Self: Sized,
    {
        builder::build(self)
    }

    /// Build and submit, returning a future of the typed result.
    ///
    /// Build failures are returned immediately and nothing is sent.
    fn send(self, session: &Session) -> std::result::Result<Pending<Self::Response>, BuildError>
    where
        Self: Sized,
    {
        pipeline::send(self, session)
    }

    /// Submit and deliver the result to `completion` on the primary queue.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    fn submit<F>(
        self,
        session: &Session,
        completion: F,
    ) -> std::result::Result<SubmitHandle, BuildError>
    where
        Self: Sized,
        F: FnOnce(Result<Self::Response>) + Send + 'static,
    {
        self.submit_on(session, Dispatch::Primary, completion)
    }

    /// Submit and deliver the result to `completion` in the given context.
    ///
    /// `completion` runs exactly once unless the handle is cancelled first.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    fn submit_on<F>(
        self,
        session: &Session,
        dispatch: Dispatch,
        completion: F,
    ) -> std::result::Result<SubmitHandle, BuildError>
    where
        Self: Sized,
        F: FnOnce(Result<Self::Response>) + Send + 'static,
    {
        let pending = pipeline::send(self, session)?;
        Ok(pipeline::spawn(pending, session, dispatch, completion))
    }

    /// Hide the concrete type behind [`AnyEndpoint`].
    fn erase(self) -> AnyEndpoint<Self::Response>
    where
        Self: Sized,
    {
        AnyEndpoint::new(self)
    }
}
