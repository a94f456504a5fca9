//! Result formats.

use std::any::{Any, type_name};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{ContentType, DateStrategy, DecodeError, Request, from_json_with};

/// The response body type for endpoints that do not decode their payload.
pub type Raw = Bytes;

/// How a response body is decoded, and which headers announce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultFormat {
    /// JSON bodies; sets `Accept` and `Content-Type` to `application/json`.
    #[default]
    Json,
    /// Bytes as received; sets no headers. Only valid with a [`Raw`] response type.
    Raw,
}

impl ResultFormat {
    /// Apply this format's headers to a request.
    ///
    /// `Raw` leaves the request untouched. `Json` overwrites `Accept` and
    /// `Content-Type` and keeps every other header.
    #[must_use]
    pub fn apply_headers(self, request: Request) -> Request {
        match self {
            Self::Raw => request,
            Self::Json => request
                .with_header("Accept", ContentType::Json.as_str())
                .with_header("Content-Type", ContentType::Json.as_str()),
        }
    }

    /// Decode a body into `T`.
    ///
    /// `Raw` hands the bytes back unchanged; `T` must be [`Raw`], anything
    /// else yields [`DecodeError::RawTypeMismatch`].
    pub fn decode<T>(self, body: Bytes, strategy: &DateStrategy) -> Result<T, DecodeError>
    where
        T: DeserializeOwned + 'static,
    {
        match self {
            Self::Json => from_json_with(&body, strategy),
            Self::Raw => downcast_raw(body),
        }
    }
}

/// Hand raw bytes back as `T`, provided `T` is [`Raw`].
pub fn downcast_raw<T: 'static>(body: Bytes) -> Result<T, DecodeError> {
    let boxed: Box<dyn Any> = Box::new(body);
    boxed
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| DecodeError::RawTypeMismatch {
            expected: type_name::<T>(),
        })
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::Method;

    fn request() -> Request {
        Request::builder(Method::Post, "https://example.com/x".parse().expect("url"))
            .header("Authorization", "Bearer token")
            .header("accept", "text/html")
            .build()
    }

    #[test]
    fn raw_headers_are_identity() {
        check!(ResultFormat::Raw.apply_headers(request()) == request());
    }

    #[test]
    fn json_headers_set_exactly_two() {
        let original = request();
        let updated = ResultFormat::Json.apply_headers(original.clone());

        check!(updated.header("Accept") == Some("application/json"));
        check!(updated.header("Content-Type") == Some("application/json"));
        check!(updated.header("Authorization") == Some("Bearer token"));
        check!(updated.headers().len() == 3);
        check!(original.header("Accept") == Some("text/html"));
    }

    #[test]
    fn json_decode() {
        let value: Vec<u32> = ResultFormat::Json
            .decode(Bytes::from_static(b"[1,2,3]"), &DateStrategy::Deferred)
            .expect("decode");
        check!(value == vec![1, 2, 3]);

        let result: Result<Vec<u32>, _> =
            ResultFormat::Json.decode(Bytes::from_static(b"{"), &DateStrategy::Deferred);
        let_assert!(Err(DecodeError::Json { .. }) = result);
    }

    #[test]
    fn raw_decode_returns_the_bytes() {
        let bytes = Bytes::from_static(b"<html></html>");
        let value: Raw = ResultFormat::Raw
            .decode(bytes.clone(), &DateStrategy::Deferred)
            .expect("decode");
        check!(value == bytes);
    }

    #[test]
    fn raw_decode_into_other_type_is_rejected() {
        let result: Result<String, _> =
            ResultFormat::Raw.decode(Bytes::from_static(b"text"), &DateStrategy::Deferred);
        let_assert!(Err(DecodeError::RawTypeMismatch { expected }) = result);
        check!(expected.contains("String"));
    }
}
