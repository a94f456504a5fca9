//! Integration tests for the submission pipeline over `HyperClient` using wiremock.

use std::borrow::Cow;
use std::time::Duration;

use assert2::{check, let_assert};
use courier::{
    Authenticating, Bytes, CachePolicy, Dispatch, EncodeBody, Endpoint, HttpError, Interceptable,
    Method, OptionalResponse, Raw, Request, ResultFormat, Session, TransportError,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, header_exists, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    first_name: String,
    last_name: String,
    age: u32,
}

fn ada() -> Person {
    Person {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        age: 36,
    }
}

/// GET `{base}{path}` decoding into `T`.
struct Get<T> {
    base: String,
    path: &'static str,
    format: ResultFormat,
    _response: std::marker::PhantomData<fn() -> T>,
}

impl<T> Get<T> {
    fn new(server: &MockServer, path: &'static str) -> Self {
        Self {
            base: server.uri(),
            path,
            format: ResultFormat::Json,
            _response: std::marker::PhantomData,
        }
    }

    fn raw(mut self) -> Self {
        self.format = ResultFormat::Raw;
        self
    }
}

impl<T> Endpoint for Get<T>
where
    T: serde::de::DeserializeOwned + Send + 'static,
{
    type Response = T;
    const METHOD: Method = Method::Get;

    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.base)
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.path)
    }

    fn result_format(&self) -> ResultFormat {
        self.format
    }
}

#[tokio::test]
async fn test_204_with_raw_format_is_an_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let body = Get::<Raw>::new(&mock_server, "/empty")
        .raw()
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");

    check!(body.is_empty());
}

#[tokio::test]
async fn test_json_response_is_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/1"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let person = Get::<Person>::new(&mock_server, "/people/1")
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");

    check!(person == ada());
}

#[tokio::test]
async fn test_raw_format_sends_no_json_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header_exists("Accept"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let body = Get::<Raw>::new(&mock_server, "/page")
        .raw()
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");

    check!(body == Bytes::from_static(b"<html></html>"));
}

#[tokio::test]
async fn test_403_is_an_unsuccessful_response_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-Reason", "forbidden")
                .set_body_string("nope"),
        )
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let result = Get::<Person>::new(&mock_server, "/secret")
        .send(&session)
        .expect("valid request")
        .await;

    let_assert!(Err(error) = result);
    check!(error == HttpError::unsuccessful(403, Some(Bytes::from_static(b"nope"))));
    check!(error.is_client_error());
    let_assert!(HttpError::UnsuccessfulResponse { headers, .. } = error);
    check!(headers.get("x-reason") == Some("forbidden"));
}

#[tokio::test]
async fn test_mismatched_payload_is_unable_to_deserialize() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"personId":"123"}"#))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let result = Get::<Person>::new(&mock_server, "/people/123")
        .send(&session)
        .expect("valid request")
        .await;

    let_assert!(Err(HttpError::UnableToDeserialize { error, body }) = result);
    check!(body == Some(Bytes::from_static(br#"{"personId":"123"}"#)));
    check!(error.to_string().contains("firstName"));
}

#[tokio::test]
async fn test_optional_response_tolerates_mismatched_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"personId":"123"}"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/people/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let missing = Get::<OptionalResponse<Person>>::new(&mock_server, "/people/123")
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");
    check!(missing.instance().is_none());

    let present = Get::<OptionalResponse<Person>>::new(&mock_server, "/people/1")
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");
    check!(present.into_inner() == Some(ada()));
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nothing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ack {
        #[serde(default)]
        ok: bool,
    }

    let session = Session::new();
    let ack = Get::<Ack>::new(&mock_server, "/nothing")
        .send(&session)
        .expect("valid request")
        .await
        .expect("success");
    check!(ack == Ack { ok: false });
}

/// Endpoint that signs and intercepts.
struct Tweaked {
    base: String,
}

impl Endpoint for Tweaked {
    type Response = Raw;
    const METHOD: Method = Method::Get;

    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.base)
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/tweaked")
    }

    fn signer(&self) -> Option<&dyn Authenticating> {
        Some(self)
    }

    fn interceptor(&self) -> Option<&dyn Interceptable> {
        Some(self)
    }
}

impl Authenticating for Tweaked {
    fn sign(&self, request: Request) -> Request {
        request
            .with_header("Authorization", "Bearer signed")
            .with_header("Accept", "signer-value")
    }
}

impl Interceptable for Tweaked {
    fn intercept(&self, request: Request) -> Request {
        request.with_header("Accept", "ANYTHING-YOU-WANT")
    }
}

#[tokio::test]
async fn test_interceptor_runs_last() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tweaked"))
        .and(header("Accept", "ANYTHING-YOU-WANT"))
        .and(header("Authorization", "Bearer signed"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let body = Tweaked {
        base: mock_server.uri(),
    }
    .send(&session)
    .expect("valid request")
    .await
    .expect("interceptor header reached the server");

    check!(body == Bytes::from_static(b"ok"));
}

/// POST with an optional pre-encoded body.
#[derive(Serialize)]
struct CreatePerson {
    #[serde(skip)]
    base: String,
    #[serde(skip)]
    pre_encoded: Option<&'static str>,
    #[serde(flatten)]
    person: Person,
}

impl Endpoint for CreatePerson {
    type Response = Person;
    const METHOD: Method = Method::Post;

    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.base)
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/people")
    }

    fn pre_encoded(&self) -> Option<Bytes> {
        self.pre_encoded.map(|s| Bytes::from_static(s.as_bytes()))
    }

    fn encodable(&self) -> Option<&dyn EncodeBody> {
        Some(self)
    }
}

#[tokio::test]
async fn test_encodable_endpoint_is_the_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/people"))
        .and(body_json(ada()))
        .respond_with(ResponseTemplate::new(201).set_body_json(ada()))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let created = CreatePerson {
        base: mock_server.uri(),
        pre_encoded: None,
        person: ada(),
    }
    .send(&session)
    .expect("valid request")
    .await
    .expect("success");

    check!(created == ada());
}

#[tokio::test]
async fn test_pre_encoded_body_wins() {
    let mock_server = MockServer::start().await;

    let payload = r#"{"firstName":"Grace","lastName":"Hopper","age":85}"#;
    Mock::given(method("POST"))
        .and(path("/people"))
        .and(body_string(payload))
        .respond_with(ResponseTemplate::new(201).set_body_string(payload))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let created = CreatePerson {
        base: mock_server.uri(),
        pre_encoded: Some(payload),
        person: ada(),
    }
    .send(&session)
    .expect("valid request")
    .await
    .expect("success");

    check!(created.first_name == "Grace");
}

/// Endpoint with a tiny timeout and a cache policy.
struct Slow {
    base: String,
}

impl Endpoint for Slow {
    type Response = Raw;
    const METHOD: Method = Method::Get;

    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.base)
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/slow")
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(100)
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::ReloadIgnoringCache
    }
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .and(header("Cache-Control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let result = Slow {
        base: mock_server.uri(),
    }
    .send(&session)
    .expect("valid request")
    .await;

    let_assert!(Err(HttpError::Other { error, body: None }) = result);
    check!(error.is_timeout());
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_failure() {
    let session = Session::new();
    let result = Slow {
        base: "http://127.0.0.1:1".to_string(),
    }
    .send(&session)
    .expect("valid request")
    .await;

    let_assert!(Err(HttpError::Other { error, .. }) = result);
    check!(matches!(
        error,
        TransportError::Connection(_) | TransportError::Timeout
    ));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent"))
        .and(header("User-Agent", courier::DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let result = Get::<Raw>::new(&mock_server, "/agent")
        .send(&session)
        .expect("valid request")
        .await;

    check!(result.is_ok());
}

#[tokio::test]
async fn test_submit_delivers_once_on_the_primary_queue() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let (tx, rx) = oneshot::channel();
    let _handle = Get::<Person>::new(&mock_server, "/people/1")
        .submit(&session, move |result| {
            let thread = std::thread::current().name().map(ToString::to_string);
            let _ = tx.send((result, thread));
        })
        .expect("valid request");

    let (result, thread) = rx.await.expect("callback ran");
    check!(result == Ok(ada()));
    check!(thread.as_deref() == Some("courier-primary"));
}

#[tokio::test]
async fn test_submit_on_transport_context() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let session = Session::new();
    let (tx, rx) = oneshot::channel();
    let _handle = Get::<Person>::new(&mock_server, "/missing")
        .submit_on(&session, Dispatch::Transport, move |result| {
            let _ = tx.send(result);
        })
        .expect("valid request");

    let result = rx.await.expect("callback ran");
    check!(result == Err(HttpError::unsuccessful(404, Some(Bytes::new()))));
}
