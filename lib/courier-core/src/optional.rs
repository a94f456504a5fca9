//! Lenient response decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A response type that never fails to decode.
///
/// Holds `Some(T)` when the payload decodes as `T` and `None` otherwise, so an
/// endpoint using it reports a malformed body as a successful absence.
///
/// ```
/// use courier_core::{OptionalResponse, from_json};
///
/// let value: OptionalResponse<Vec<u32>> = from_json(br#"{"error":"nope"}"#).unwrap();
/// assert!(value.instance().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionalResponse<T>(Option<T>);

impl<T> OptionalResponse<T> {
    /// Wrap an already decoded value.
    #[must_use]
    pub const fn new(instance: Option<T>) -> Self {
        Self(instance)
    }

    /// The decoded value, if the payload matched `T`.
    #[must_use]
    pub const fn instance(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Unwrap into the inner option.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for OptionalResponse<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> From<OptionalResponse<T>> for Option<T> {
    fn from(value: OptionalResponse<T>) -> Self {
        value.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OptionalResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only syntactically broken JSON is an error; shape mismatches become `None`.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self(T::deserialize(value).ok()))
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{DateStrategy, Timestamp, from_json, from_json_with};

    #[derive(Debug, PartialEq, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Person {
        first_name: String,
        last_name: String,
        age: u32,
    }

    #[test]
    fn matching_payload_is_some() {
        let value: OptionalResponse<Person> =
            from_json(br#"{"firstName":"Ada","lastName":"Lovelace","age":36}"#).expect("decode");
        check!(
            value.into_inner()
                == Some(Person {
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    age: 36,
                })
        );
    }

    #[test]
    fn mismatched_payload_is_none() {
        let value: OptionalResponse<Person> = from_json(br#"{"personId":"123"}"#).expect("decode");
        check!(value.instance().is_none());

        let value: OptionalResponse<Person> = from_json(b"{}").expect("decode");
        check!(value == OptionalResponse::default());
    }

    #[test]
    fn decoding_respects_the_date_strategy() {
        #[derive(Debug, serde::Deserialize)]
        struct Stamped {
            at: Timestamp,
        }

        let value: OptionalResponse<Stamped> =
            from_json_with(br#"{"at":1528848000}"#, &DateStrategy::SecondsSince1970)
                .expect("decode");
        let expected = Utc
            .with_ymd_and_hms(2018, 6, 13, 0, 0, 0)
            .single()
            .expect("valid date");
        check!(value.instance().map(|s| s.at.0) == Some(expected));
    }

    #[test]
    fn broken_json_is_still_an_error() {
        let result: Result<OptionalResponse<Person>, _> = from_json(b"{");
        check!(result.is_err());
    }
}
