//! Turning an endpoint descriptor into a [`Request`].

use bytes::Bytes;
use url::Url;

use crate::{BuildError, Endpoint, Request};

/// Build the request for `endpoint`.
///
/// The URL is [`Endpoint::url`] when present, otherwise `base_url + path`.
/// The body is the pre-encoded bytes if any, else the JSON encoding of the
/// endpoint, else nothing.
pub(crate) fn build<E: Endpoint>(endpoint: &E) -> Result<Request, BuildError> {
    let url = resolve_url(endpoint)?;
    let body = encode_body(endpoint)?;

    Ok(Request::builder(E::METHOD, url)
        .cache_policy(endpoint.cache_policy())
        .timeout(endpoint.timeout())
        .maybe_body(body)
        .build())
}

fn resolve_url<E: Endpoint>(endpoint: &E) -> Result<Url, BuildError> {
    if let Some(url) = endpoint.url() {
        return Ok(url);
    }

    let attempted = format!("{}{}", endpoint.base_url(), endpoint.path());
    Url::parse(&attempted).map_err(|_| BuildError::InvalidUrl(attempted))
}

fn encode_body<E: Endpoint>(endpoint: &E) -> Result<Option<Bytes>, BuildError> {
    if let Some(bytes) = endpoint.pre_encoded() {
        return Ok(Some(bytes));
    }

    match endpoint.encodable() {
        Some(encoder) => Ok(Some(
            encoder.encode_body(&endpoint.date_encoding_strategy())?,
        )),
        None => Ok(None),
    }
}
