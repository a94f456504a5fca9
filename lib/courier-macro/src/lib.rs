//! Derive macro for courier endpoint descriptors.
//!
//! `#[derive(Endpoint)]` implements `courier::Endpoint` from `#[endpoint(...)]`
//! attributes. Anything not covered by the attributes can be written by hand on
//! the `Endpoint` trait instead.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Serialize, Endpoint)]
//! #[endpoint(method = "POST", base_url = "https://api.example.com", path = "/users/{id}/notes")]
//! #[endpoint(response = Note, encodable)]
//! struct AddNote {
//!     #[serde(skip)]
//!     id: u64,
//!     text: String,
//! }
//! ```

mod attrs;
mod expand;

use proc_macro::TokenStream;

/// Derive `courier::Endpoint`.
///
/// # Attributes
///
/// - `method` (required): `"GET"`, `"POST"`, `"PUT"`, `"PATCH"` or `"DELETE"`
/// - `base_url`, `path`: joined to form the request URL; `{field}` placeholders
///   in `path` are replaced by the field's `Display` value
/// - `url`: absolute URL that takes precedence over `base_url + path`
/// - `response`: the decoded response type (default `courier::Raw`)
/// - `format`: `"json"` (default) or `"raw"`
/// - `timeout`: seconds as an integer, or a string like `"30s"`, `"500ms"`
/// - `date_strategy`: `"deferred"`, `"seconds"`, `"milliseconds"`, `"iso8601"`
/// - `encodable`: JSON-encode the type itself as the body (requires `Serialize`)
/// - `pre_encoded = "field"`: use the field's bytes as the body
/// - `sign`, `intercept`, `publish`: the type implements `Authenticating`,
///   `Interceptable` or `NotificationPublishable` respectively
#[proc_macro_derive(Endpoint, attributes(endpoint))]
pub fn derive_endpoint(input: TokenStream) -> TokenStream {
    expand::expand_endpoint_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
