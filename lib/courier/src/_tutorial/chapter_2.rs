//! # Chapter 2: Results & Errors
//!
//! Decoding responses and handling failures.
//!
//! ## Result Formats
//!
//! | Format | Headers set | Response type |
//! |--------|-------------|---------------|
//! | `json` (default) | `Accept` and `Content-Type: application/json` | any `DeserializeOwned` |
//! | `raw` | none | [`Raw`](crate::Raw) |
//!
//! A [`Raw`](crate::Raw) response type always receives the body bytes as-is,
//! or an empty buffer when there is no body, whatever the format.
//!
//! A successful response without a body is decoded as `{}`.
//!
//! ## Tolerating Missing Payloads
//!
//! Some endpoints sometimes answer with something else. Wrap the response type
//! in [`OptionalResponse`](crate::OptionalResponse) and a shape mismatch
//! becomes a successful `None`:
//!
//! ```ignore
//! #[derive(Endpoint)]
//! #[endpoint(method = "GET", url = "https://api.example.com/me/profile")]
//! #[endpoint(response = OptionalResponse<Profile>)]
//! pub struct MyProfile;
//!
//! let profile: Option<Profile> = MyProfile.send(&session)?.await?.into_inner();
//! ```
//!
//! ## Errors
//!
//! [`HttpError`](crate::HttpError) covers everything after the request left:
//!
//! | Variant | When |
//! |---------|------|
//! | `NoResponse` | the transport reported nothing |
//! | `UnexpectedResponse` | the response is not HTTP |
//! | `UnsuccessfulResponse` | status outside 2xx |
//! | `UnableToDeserialize` | the body did not decode |
//! | `Other` | the transport failed |
//!
//! Every variant but `NoResponse` keeps the body bytes:
//!
//! ```ignore
//! match GetUser { id: 1 }.send(&session)?.await {
//!     Ok(user) => println!("{user:?}"),
//!     Err(e) if e.status() == Some(404) => println!("no such user"),
//!     Err(e) => {
//!         if let Some(Ok(api)) = e.decode_body::<ApiError>() {
//!             eprintln!("API error: {}", api.message);
//!         }
//!     }
//! }
//! ```
//!
//! Errors compare loosely: two `UnableToDeserialize` (or two `Other`) errors
//! are equal when their bodies are, whatever the wrapped error says.
//!
//! ## Next Steps
//!
//! - [Chapter 3: Sessions & Dispatch][super::chapter_3] - Transports and callbacks
