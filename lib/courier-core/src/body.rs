//! JSON body helpers.

use bytes::Bytes;

use crate::{DateStrategy, DecodeError, with_date_strategy};

/// Content type for request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes with the default date strategy.
///
/// # Example
///
/// ```
/// use courier_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<Bytes> {
    to_json_with(value, &DateStrategy::Deferred)
}

/// Serialize a value to JSON bytes, writing dates with `strategy`.
pub fn to_json_with<T: serde::Serialize + ?Sized>(
    value: &T,
    strategy: &DateStrategy,
) -> serde_json::Result<Bytes> {
    with_date_strategy(strategy, || serde_json::to_vec(value)).map(Bytes::from)
}

/// Deserialize JSON bytes with the default date strategy.
///
/// Errors carry the path of the field that failed (e.g. `user.address.city`).
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    from_json_with(bytes, &DateStrategy::Deferred)
}

/// Deserialize JSON bytes, reading dates with `strategy`.
pub fn from_json_with<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
    strategy: &DateStrategy,
) -> Result<T, DecodeError> {
    with_date_strategy(strategy, || {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let value = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| DecodeError::json(e.path().to_string(), e.inner().to_string()))?;
        deserializer
            .end()
            .map_err(|e| DecodeError::json(".", e.to_string()))?;
        Ok(value)
    })
}
