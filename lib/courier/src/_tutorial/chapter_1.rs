//! # Chapter 1: Bodies & Capabilities
//!
//! Optional behaviors an endpoint can opt into.
//!
//! ## JSON Bodies
//!
//! Mark a `Serialize` endpoint as `encodable` and it becomes its own body:
//!
//! ```ignore
//! #[derive(Serialize, Endpoint)]
//! #[endpoint(method = "POST", base_url = "https://api.example.com", path = "/users")]
//! #[endpoint(response = User, encodable)]
//! pub struct CreateUser {
//!     pub display_name: String,
//! }
//! ```
//!
//! Dates inside the body are written as [`Timestamp`](crate::Timestamp)
//! values, following the endpoint's date strategy:
//!
//! ```ignore
//! #[endpoint(method = "POST", url = "https://api.example.com/events", encodable, date_strategy = "iso8601")]
//! ```
//!
//! ## Pre-Encoded Bodies
//!
//! Point `pre_encoded` at a field holding bytes you already have. It wins over
//! `encodable` when both are present:
//!
//! ```ignore
//! #[derive(Endpoint)]
//! #[endpoint(method = "PUT", url = "https://files.example.com/avatar", pre_encoded = "png")]
//! pub struct UploadAvatar {
//!     pub png: Vec<u8>,
//! }
//! ```
//!
//! ## Signing
//!
//! `sign` runs after the result format headers are set:
//!
//! ```ignore
//! #[derive(Endpoint)]
//! #[endpoint(method = "GET", url = "https://api.example.com/me", sign)]
//! pub struct Me {
//!     pub token: String,
//! }
//!
//! impl Authenticating for Me {
//!     fn sign(&self, request: Request) -> Request {
//!         request.with_header("Authorization", format!("Bearer {}", self.token))
//!     }
//! }
//! ```
//!
//! ## Interception
//!
//! `intercept` runs last, right before the transport. Headers set here are the
//! ones that go on the wire, even those the result format also sets:
//!
//! ```ignore
//! impl Interceptable for Me {
//!     fn intercept(&self, request: Request) -> Request {
//!         request.with_header("Accept", "application/vnd.example+json")
//!     }
//! }
//! ```
//!
//! ## Order of Operations
//!
//! ```text
//! request() → result format headers → sign → intercept → transport
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 2: Results & Errors][super::chapter_2] - What comes back
