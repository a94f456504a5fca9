//! Case-insensitive header map.

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue};

/// Header map with case-insensitive names, backed by [`http::HeaderMap`].
///
/// Names are normalized to lowercase. A `set` with a name or value that is not
/// valid in HTTP is recorded in [`Headers::rejected`] instead of being stored;
/// transports refuse to send such a request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HeaderMap,
    rejected: Option<String>,
}

impl Headers {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any value stored under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let parsed = HeaderName::from_bytes(name.as_bytes())
            .ok()
            .zip(HeaderValue::from_str(&value.into()).ok());
        match parsed {
            Some((name, value)) => {
                self.map.insert(name, value);
            }
            None => {
                self.rejected.get_or_insert(name);
            }
        }
    }

    /// Header value by name. Values that are not visible ASCII read as `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|value| value.to_str().ok())
    }

    /// `true` when a header with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Removes a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map
            .remove(name)
            .and_then(|value| value.to_str().ok().map(ToString::to_string))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.keys_len()
    }

    /// `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(name, value)` pairs, skipping values that are not text.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
    }

    /// Name of the first header that could not be stored, if any.
    #[must_use]
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    /// The underlying [`HeaderMap`].
    #[must_use]
    pub const fn as_header_map(&self) -> &HeaderMap {
        &self.map
    }
}

impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        Self {
            map,
            rejected: None,
        }
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.extend(iter);
        headers
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");

        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert!(headers.contains("Content-type"));
    }

    #[test]
    fn set_replaces_regardless_of_case() {
        let mut headers = Headers::new();
        headers.set("Accept", "application/json");
        headers.set("accept", "text/html");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("text/html"));
        assert_eq!(headers.iter().next(), Some(("accept", "text/html")));
    }

    #[test]
    fn remove_and_collect() {
        let mut headers: Headers = [("X-One", "1"), ("X-Two", "2")].into_iter().collect();
        assert_eq!(headers.remove("x-one"), Some("1".to_string()));
        assert_eq!(headers.len(), 1);
        assert!(!headers.is_empty());
    }

    #[test]
    fn invalid_headers_are_rejected_not_stored() {
        let mut headers = Headers::new();
        headers.set("X-Ok", "yes");
        headers.set("Bad Name", "value");
        headers.set("X-Split", "line\r\nbreak");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.rejected(), Some("Bad Name"));
        assert!(!headers.contains("X-Split"));
    }

    #[test]
    fn wraps_an_existing_header_map() {
        let mut map = HeaderMap::new();
        map.insert(http::header::ETAG, HeaderValue::from_static("\"v1\""));

        let headers = Headers::from(map);
        assert_eq!(headers.get("ETag"), Some("\"v1\""));
        assert!(headers.rejected().is_none());
        assert_eq!(headers.as_header_map().len(), 1);
    }
}
