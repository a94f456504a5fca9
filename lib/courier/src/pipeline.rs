//! The submission pipeline.
//!
//! build → result format headers → sign → intercept → transport → classify →
//! decode. Everything up to the transport call happens synchronously in
//! [`send`]; the returned future covers the rest.

use std::any::TypeId;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::notification::{Notification, NotificationCenter};
use crate::transport::Exchange;
use crate::{
    BuildError, DateStrategy, Dispatch, Endpoint, HttpError, Raw, Request, Result, ResultFormat,
    Session, SubmitHandle, UrlResponse, downcast_raw,
};

/// Future of a submitted request's result.
pub type Pending<T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'static>>;

/// Body decoded when a successful response carries none.
const EMPTY_OBJECT: &[u8] = b"{}";

/// The request exactly as it will be handed to the transport.
pub(crate) fn prepare<E: Endpoint>(endpoint: &E) -> std::result::Result<Request, BuildError> {
    let request = endpoint.request()?;
    let request = endpoint.result_format().apply_headers(request);
    let request = match endpoint.signer() {
        Some(signer) => signer.sign(request),
        None => request,
    };
    let request = match endpoint.interceptor() {
        Some(interceptor) => interceptor.intercept(request),
        None => request,
    };
    Ok(request)
}

pub(crate) fn send<E: Endpoint>(
    endpoint: E,
    session: &Session,
) -> std::result::Result<Pending<E::Response>, BuildError> {
    let request = prepare(&endpoint)?;
    debug!(
        method = %request.method(),
        url = %request.url(),
        headers = ?request.headers(),
        body = ?request.body().map(|body| String::from_utf8_lossy(body)),
        "dispatching request"
    );

    let exchange = session.transport().send(request);
    let notifications = session.notifications().clone();
    let endpoint = Arc::new(endpoint);

    Ok(Box::pin(async move {
        let exchange = exchange.await;
        resolve(endpoint, exchange, &notifications)
    }))
}

/// Drive `pending` on a new task and hand its result to `completion`.
pub(crate) fn spawn<T, F>(
    pending: Pending<T>,
    session: &Session,
    dispatch: Dispatch,
    completion: F,
) -> SubmitHandle
where
    T: Send + 'static,
    F: FnOnce(Result<T>) + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let primary = session.primary().clone();
    let flag = Arc::clone(&cancelled);

    let task = tokio::spawn(async move {
        let result = pending.await;
        match dispatch {
            Dispatch::Transport => completion(result),
            Dispatch::Primary => primary.post(move || {
                if !flag.load(Ordering::Acquire) {
                    completion(result);
                }
            }),
        }
    });

    SubmitHandle::new(task, cancelled)
}

/// Classify what the transport observed and decode on success.
fn resolve<E: Endpoint>(
    endpoint: Arc<E>,
    exchange: Exchange,
    notifications: &NotificationCenter,
) -> Result<E::Response> {
    let Exchange {
        body,
        response,
        error,
    } = exchange;

    if let Some(error) = error {
        warn!(%error, "transport failed");
        return Err(HttpError::Other { error, body });
    }

    let response = match response {
        None => return Err(HttpError::NoResponse),
        Some(UrlResponse::Other(meta)) => {
            return Err(HttpError::UnexpectedResponse {
                response: meta,
                body,
            });
        }
        Some(UrlResponse::Http(response)) => response,
    };

    debug!(
        status = response.status(),
        headers = ?response.headers(),
        body_len = body.as_ref().map_or(0, Bytes::len),
        "received response"
    );

    if !response.is_success() {
        let status = response.status();
        let headers = response.headers().clone();
        let publish = endpoint
            .publisher()
            .is_some_and(|publisher| publisher.should_publish(&response));
        if publish {
            notifications.publish(Notification::received_non_2xx(endpoint, response));
        }
        return Err(HttpError::UnsuccessfulResponse {
            status,
            headers,
            body,
        });
    }

    decode(
        endpoint.result_format(),
        body,
        &endpoint.date_decoding_strategy(),
    )
}

fn decode<T>(format: ResultFormat, body: Option<Bytes>, strategy: &DateStrategy) -> Result<T>
where
    T: DeserializeOwned + 'static,
{
    if TypeId::of::<T>() == TypeId::of::<Raw>() {
        return downcast_raw(body.unwrap_or_default())
            .map_err(|error| HttpError::UnableToDeserialize { error, body: None });
    }

    let payload = body
        .clone()
        .unwrap_or_else(|| Bytes::from_static(EMPTY_OBJECT));
    format.decode(payload, strategy).map_err(|error| {
        warn!(%error, "unable to deserialize response");
        HttpError::UnableToDeserialize { error, body }
    })
}
