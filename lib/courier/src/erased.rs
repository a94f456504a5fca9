//! Type-erased endpoints.

use std::borrow::Cow;
use std::fmt;

use crate::pipeline::{self, Pending};
use crate::{BuildError, Dispatch, Endpoint, Request, Result, Session, SubmitHandle};

/// Object-safe view of an [`Endpoint`] with response type `T`.
trait ErasedEndpoint<T>: Send + Sync {
    fn base_url(&self) -> Cow<'_, str>;
    fn path(&self) -> Cow<'_, str>;
    fn request(&self) -> std::result::Result<Request, BuildError>;
    fn send(self: Box<Self>, session: &Session) -> std::result::Result<Pending<T>, BuildError>;
}

impl<E: Endpoint> ErasedEndpoint<E::Response> for E {
    fn base_url(&self) -> Cow<'_, str> {
        Endpoint::base_url(self)
    }

    fn path(&self) -> Cow<'_, str> {
        Endpoint::path(self)
    }

    fn request(&self) -> std::result::Result<Request, BuildError> {
        Endpoint::request(self)
    }

    fn send(
        self: Box<Self>,
        session: &Session,
    ) -> std::result::Result<Pending<E::Response>, BuildError> {
        pipeline::send(*self, session)
    }
}

/// Any endpoint whose response type is `T`.
///
/// Lets endpoints of different types share a collection or a signature:
///
/// ```ignore
/// let endpoints: Vec<AnyEndpoint<User>> = vec![GetMe.erase(), GetUser { id: 7 }.erase()];
/// ```
pub struct AnyEndpoint<T> {
    inner: Box<dyn ErasedEndpoint<T>>,
}

impl<T> fmt::Debug for AnyEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyEndpoint")
            .field("base_url", &self.inner.base_url())
            .field("path", &self.inner.path())
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> AnyEndpoint<T> {
    /// Erase `endpoint`.
    pub fn new<E: Endpoint<Response = T>>(endpoint: E) -> Self {
        Self {
            inner: Box::new(endpoint),
        }
    }

    /// The wrapped endpoint's base URL.
    #[must_use]
    pub fn base_url(&self) -> Cow<'_, str> {
        self.inner.base_url()
    }

    /// The wrapped endpoint's path.
    #[must_use]
    pub fn path(&self) -> Cow<'_, str> {
        self.inner.path()
    }

    /// See [`Endpoint::request`].
    pub fn request(&self) -> std::result::Result<Request, BuildError> {
        self.inner.request()
    }

    /// See [`Endpoint::send`].
    pub fn send(self, session: &Session) -> std::result::Result<Pending<T>, BuildError> {
        self.inner.send(session)
    }

    /// See [`Endpoint::submit`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn submit<F>(
        self,
        session: &Session,
        completion: F,
    ) -> std::result::Result<SubmitHandle, BuildError>
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        self.submit_on(session, Dispatch::Primary, completion)
    }

    /// See [`Endpoint::submit_on`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn submit_on<F>(
        self,
        session: &Session,
        dispatch: Dispatch,
        completion: F,
    ) -> std::result::Result<SubmitHandle, BuildError>
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let pending = self.inner.send(session)?;
        Ok(pipeline::spawn(pending, session, dispatch, completion))
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::{Method, Raw};

    struct Home;

    impl Endpoint for Home {
        type Response = Raw;
        const METHOD: Method = Method::Get;

        fn base_url(&self) -> Cow<'_, str> {
            "https://example.com".into()
        }
    }

    struct Search(&'static str);

    impl Endpoint for Search {
        type Response = Raw;
        const METHOD: Method = Method::Post;

        fn url(&self) -> Option<Url> {
            Url::parse(&format!("https://search.example.com/?q={}", self.0)).ok()
        }
    }

    #[test]
    fn erased_endpoints_forward_to_the_original() {
        let endpoints: Vec<AnyEndpoint<Raw>> = vec![Home.erase(), AnyEndpoint::new(Search("rust"))];

        let urls: Vec<_> = endpoints
            .iter()
            .map(|endpoint| endpoint.request().expect("valid").url().to_string())
            .collect();
        assert_eq!(
            urls,
            vec!["https://example.com/", "https://search.example.com/?q=rust"]
        );

        let methods: Vec<_> = endpoints
            .iter()
            .map(|endpoint| endpoint.request().expect("valid").method())
            .collect();
        assert_eq!(methods, vec![Method::Get, Method::Post]);

        assert_eq!(endpoints[0].base_url(), "https://example.com");
        assert_eq!(endpoints[1].path(), "");
        assert!(format!("{:?}", endpoints[0]).contains("example.com"));
    }
}
